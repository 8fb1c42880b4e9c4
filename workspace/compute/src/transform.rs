//! Raw record → chart configuration transformers.

pub mod capacity;
pub mod generation;

pub use capacity::{build_capacity_chart, group_by_source, SourceTotals};
pub use generation::{build_generation_chart, parse_record_date, sort_by_date, tick_interval};
