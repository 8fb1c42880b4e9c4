use std::collections::HashMap;

use common::{ChartConfig, ChartOptions, ChartType, ProjectRecord, Series, Title, XAxis, YAxis};
use tracing::debug;

pub const CAPACITY_SERIES: &str = "Capacidad acumulada (MW)";
pub const PROJECTS_SERIES: &str = "Número de proyectos";

const CAPACITY_COLOR: &str = "#FFC800";
const PROJECTS_COLOR: &str = "#4CAF50";
const GRID_LINE: &str = "#333333";

/// Summed capacity and project count of one source type.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTotals {
    pub source: String,
    pub capacity: f64,
    pub projects: f64,
}

/// Sums capacity and project counts per `tipo_proyecto_fuente`, keeping the
/// order in which each source first appears. Null values count as 0.
pub fn group_by_source(records: &[ProjectRecord]) -> Vec<SourceTotals> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<SourceTotals> = Vec::new();

    for record in records {
        let idx = *positions
            .entry(record.tipo_proyecto_fuente.as_str())
            .or_insert_with(|| {
                totals.push(SourceTotals {
                    source: record.tipo_proyecto_fuente.clone(),
                    capacity: 0.0,
                    projects: 0.0,
                });
                totals.len() - 1
            });

        let group = &mut totals[idx];
        group.capacity += record.capacidad_acumulada.unwrap_or(0.0);
        group.projects += record.numero_proyectos.unwrap_or(0.0);
    }

    totals
}

/// Builds the dual-axis chart: capacity as columns on the left axis and the
/// project count as a line on the right axis.
pub fn build_capacity_chart(records: &[ProjectRecord]) -> ChartConfig {
    let totals = group_by_source(records);
    debug!(records = records.len(), sources = totals.len(), "Built capacity chart");

    let categories: Vec<String> = totals.iter().map(|t| t.source.clone()).collect();
    let capacity: Vec<f64> = totals.iter().map(|t| t.capacity).collect();
    let projects: Vec<f64> = totals.iter().map(|t| t.projects).collect();

    ChartConfig {
        chart: ChartOptions {
            chart_type: ChartType::Column,
            height: 350,
            background_color: None,
        },
        title: Title::new("Capacidad acumulada / No. de proyectos por fuente"),
        subtitle: Some(Title::new("Fuente: API. Sin rango (todos los proyectos)")),
        x_axis: XAxis {
            categories,
            tick_interval: None,
            title: Some(Title::new("Tipo de proyecto / Fuente")),
            label_rotation: None,
        },
        y_axis: vec![
            YAxis {
                title: Some(Title::new(CAPACITY_SERIES)),
                min: None,
                opposite: false,
                label_color: Some(CAPACITY_COLOR.to_string()),
                grid_line_color: Some(GRID_LINE.to_string()),
            },
            YAxis {
                title: Some(Title::new(PROJECTS_SERIES)),
                min: None,
                opposite: true,
                label_color: Some(PROJECTS_COLOR.to_string()),
                grid_line_color: Some(GRID_LINE.to_string()),
            },
        ],
        stacking: None,
        series: vec![
            Series {
                name: CAPACITY_SERIES.to_string(),
                series_type: ChartType::Column,
                data: capacity,
                color: CAPACITY_COLOR.to_string(),
                index: None,
                legend_index: None,
                y_axis: 0,
            },
            Series {
                name: PROJECTS_SERIES.to_string(),
                series_type: ChartType::Line,
                data: projects,
                color: PROJECTS_COLOR.to_string(),
                index: None,
                legend_index: None,
                y_axis: 1,
            },
        ],
    }
}
