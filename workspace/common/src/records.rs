use serde::{Deserialize, Serialize};

/// Generation technologies, listed in chart draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Technology {
    Termica,
    Cogenerador,
    Hidraulica,
    Solar,
    Eolica,
}

impl Technology {
    /// Fixed draw order. A technology's position here is also its series
    /// index and legend index.
    pub const ALL: [Technology; 5] = [
        Technology::Termica,
        Technology::Cogenerador,
        Technology::Hidraulica,
        Technology::Solar,
        Technology::Eolica,
    ];

    /// Field name used by the backend payload.
    pub fn key(self) -> &'static str {
        match self {
            Technology::Termica => "TERMICA",
            Technology::Cogenerador => "COGENERADOR",
            Technology::Hidraulica => "HIDRAULICA",
            Technology::Solar => "SOLAR",
            Technology::Eolica => "EOLICA",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Technology::Termica => "#F97316",
            Technology::Cogenerador => "#D1D1D0",
            Technology::Hidraulica => "#3B82F6",
            Technology::Solar => "#FFC800",
            Technology::Eolica => "#5DFF97",
        }
    }

    pub fn position(self) -> usize {
        match self {
            Technology::Termica => 0,
            Technology::Cogenerador => 1,
            Technology::Hidraulica => 2,
            Technology::Solar => 3,
            Technology::Eolica => 4,
        }
    }
}

/// One day of generation as returned by `grafica_generacion_diaria`.
///
/// Technology fields may be `null` or missing entirely; both deserialize to
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Date or timestamp string; only the first ten characters are charted.
    pub fecha: String,
    #[serde(rename = "TERMICA", default)]
    pub termica: Option<f64>,
    #[serde(rename = "COGENERADOR", default)]
    pub cogenerador: Option<f64>,
    #[serde(rename = "HIDRAULICA", default)]
    pub hidraulica: Option<f64>,
    #[serde(rename = "SOLAR", default)]
    pub solar: Option<f64>,
    #[serde(rename = "EOLICA", default)]
    pub eolica: Option<f64>,
}

impl GenerationRecord {
    pub fn value(&self, technology: Technology) -> Option<f64> {
        match technology {
            Technology::Termica => self.termica,
            Technology::Cogenerador => self.cogenerador,
            Technology::Hidraulica => self.hidraulica,
            Technology::Solar => self.solar,
            Technology::Eolica => self.eolica,
        }
    }

    /// The `YYYY-MM-DD` part of `fecha`.
    pub fn date_prefix(&self) -> &str {
        date_prefix(&self.fecha)
    }
}

/// One project row as returned by `acumulado_capacidad_proyectos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub tipo_proyecto_fuente: String,
    #[serde(default)]
    pub capacidad_acumulada: Option<f64>,
    #[serde(default)]
    pub numero_proyectos: Option<f64>,
    #[serde(default)]
    pub nombre_proyecto: Option<String>,
    #[serde(default)]
    pub fecha_finalizacion: Option<String>,
}

/// Returns the first ten characters of a date string, or the whole string
/// when it is shorter. Never splits a multi-byte character.
pub fn date_prefix(value: &str) -> &str {
    match value.char_indices().nth(10) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
