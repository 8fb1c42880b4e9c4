//! Common transport-layer types shared between the CLI and the dashboard.
//! Raw records mirror the backend payloads of the chart endpoints, and
//! [`ChartConfig`] is the renderer-neutral configuration the transformers
//! in `compute` produce and the cache persists.

mod chart;
mod records;
mod widgets;

pub use chart::{ChartConfig, ChartOptions, ChartType, Series, Stacking, Title, XAxis, YAxis};
pub use records::{date_prefix, GenerationRecord, ProjectRecord, Technology};
pub use widgets::{Recovery, WidgetKind, CAPACITY_ENDPOINT, GENERATION_CACHE_KEY, GENERATION_CACHE_PREFIX, GENERATION_ENDPOINT};
