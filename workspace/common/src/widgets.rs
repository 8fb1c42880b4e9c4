/// Endpoint returning one generation record per day.
pub const GENERATION_ENDPOINT: &str = "/v1/graficas/6g_proyecto/grafica_generacion_diaria";

/// Endpoint returning one row per project with its cumulative capacity.
pub const CAPACITY_ENDPOINT: &str = "/v1/graficas/6g_proyecto/acumulado_capacidad_proyectos";

/// Namespace prefix for the generation chart's durable cache entries.
pub const GENERATION_CACHE_PREFIX: &str = "generacion-despacho-cache-";

/// Logical cache key of the generation chart configuration.
pub const GENERATION_CACHE_KEY: &str = "generacion_despacho_data";

/// What the error view offers the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    None,
    /// Reload the whole page, remounting every widget.
    ReloadPage,
}

/// The two dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Stacked area chart of daily generation by technology.
    DailyGeneration,
    /// Column/line chart of cumulative capacity and project count by source.
    ProjectCapacity,
}

impl WidgetKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            WidgetKind::DailyGeneration => GENERATION_ENDPOINT,
            WidgetKind::ProjectCapacity => CAPACITY_ENDPOINT,
        }
    }

    /// Static message shown for any fetch failure.
    pub fn error_message(self) -> &'static str {
        match self {
            WidgetKind::DailyGeneration => "No se pudo cargar la gráfica de generación diaria",
            WidgetKind::ProjectCapacity => {
                "No fue posible cargar la gráfica de acumulado de capacidad."
            }
        }
    }

    pub fn loading_text(self) -> &'static str {
        match self {
            WidgetKind::DailyGeneration => {
                "Cargando gráfica de generación Diaria por Tecnología..."
            }
            WidgetKind::ProjectCapacity => "Cargando gráfica de acumulado de capacidad...",
        }
    }

    pub fn recovery(self) -> Recovery {
        match self {
            WidgetKind::DailyGeneration => Recovery::ReloadPage,
            WidgetKind::ProjectCapacity => Recovery::None,
        }
    }

    /// Minimum height in pixels of the loading and error placeholders.
    pub fn placeholder_height(self) -> u32 {
        match self {
            WidgetKind::DailyGeneration => 450,
            WidgetKind::ProjectCapacity => 256,
        }
    }

    /// Text shown by the widget's help button.
    pub fn help_text(self) -> &'static str {
        match self {
            WidgetKind::DailyGeneration => {
                "Esta gráfica muestra la generación diaria de energía desglosada por tecnología (térmica, cogeneración, hidráulica, solar y eólica)."
            }
            WidgetKind::ProjectCapacity => {
                "Esta gráfica muestra la capacidad acumulada y el número de proyectos por tipo de fuente."
            }
        }
    }

    /// Id of the DOM element the chart is drawn into.
    pub fn element_id(self) -> &'static str {
        match self {
            WidgetKind::DailyGeneration => "chart-generacion-diaria",
            WidgetKind::ProjectCapacity => "chart-acumulado-capacidad",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_heights() {
        assert_eq!(WidgetKind::DailyGeneration.placeholder_height(), 450);
        assert_eq!(WidgetKind::ProjectCapacity.placeholder_height(), 256);
    }

    #[test]
    fn test_recovery_actions() {
        assert_eq!(WidgetKind::DailyGeneration.recovery(), Recovery::ReloadPage);
        assert_eq!(WidgetKind::ProjectCapacity.recovery(), Recovery::None);
    }

    #[test]
    fn test_widgets_render_into_distinct_elements() {
        assert_ne!(
            WidgetKind::DailyGeneration.element_id(),
            WidgetKind::ProjectCapacity.element_id()
        );
        assert!(WidgetKind::DailyGeneration.help_text().contains("tecnología"));
    }
}
