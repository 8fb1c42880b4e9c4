use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use common::{
    ChartConfig, ChartOptions, ChartType, GenerationRecord, Series, Stacking, Technology, Title,
    XAxis, YAxis,
};
use tracing::{debug, trace};

/// Roughly how many x-axis labels the chart shows regardless of length.
pub const MAX_AXIS_LABELS: usize = 12;

const CHART_HEIGHT: u32 = 400;
const BACKGROUND: &str = "#262626";
const GRID_LINE: &str = "#333";

/// Label interval that keeps about [`MAX_AXIS_LABELS`] labels on the axis.
pub fn tick_interval(category_count: usize) -> usize {
    category_count.div_ceil(MAX_AXIS_LABELS).max(1)
}

/// Parses the date field of a generation record.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// `YYYY-MM-DD HH:MM:SS[.fff]` and plain `YYYY-MM-DD`.
pub fn parse_record_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Returns the records ordered by date, oldest first.
///
/// The sort is stable, so records with equal dates keep their input order.
/// Records whose date cannot be parsed go after every parseable one.
pub fn sort_by_date(records: &[GenerationRecord]) -> Vec<&GenerationRecord> {
    let mut keyed: Vec<(Option<NaiveDateTime>, &GenerationRecord)> = records
        .iter()
        .map(|record| (parse_record_date(&record.fecha), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Builds the stacked area chart of daily generation by technology.
///
/// Categories are the date prefixes of the sorted records, duplicates
/// included. Each category takes its values from the first sorted record
/// with that date; missing records and null fields chart as 0.
pub fn build_generation_chart(records: &[GenerationRecord]) -> ChartConfig {
    let sorted = sort_by_date(records);
    let categories: Vec<String> = sorted
        .iter()
        .map(|record| record.date_prefix().to_string())
        .collect();

    let mut by_date: HashMap<&str, &GenerationRecord> = HashMap::with_capacity(sorted.len());
    for record in sorted.iter().copied() {
        by_date.entry(record.date_prefix()).or_insert(record);
    }

    let series: Vec<Series> = Technology::ALL
        .iter()
        .map(|&technology| Series {
            name: technology.key().to_string(),
            series_type: ChartType::Area,
            data: categories
                .iter()
                .map(|date| {
                    by_date
                        .get(date.as_str())
                        .and_then(|record| record.value(technology))
                        .unwrap_or(0.0)
                })
                .collect(),
            color: technology.color().to_string(),
            index: Some(technology.position()),
            legend_index: Some(technology.position()),
            y_axis: 0,
        })
        .collect();

    let tick_interval = tick_interval(categories.len());
    debug!(
        records = records.len(),
        categories = categories.len(),
        distinct_dates = by_date.len(),
        tick_interval,
        "Built daily generation chart"
    );
    trace!(first = ?categories.first(), last = ?categories.last(), "Generation date range");

    ChartConfig {
        chart: ChartOptions {
            chart_type: ChartType::Area,
            height: CHART_HEIGHT,
            background_color: Some(BACKGROUND.to_string()),
        },
        title: Title::new("Generación diaria por tecnología"),
        subtitle: None,
        x_axis: XAxis {
            categories,
            tick_interval: Some(tick_interval),
            title: Some(Title::new("Fecha")),
            label_rotation: Some(-45),
        },
        y_axis: vec![YAxis {
            title: Some(Title::new("Generación (MW)")),
            min: Some(0.0),
            opposite: false,
            label_color: None,
            grid_line_color: Some(GRID_LINE.to_string()),
        }],
        stacking: Some(Stacking::Normal),
        series,
    }
}
