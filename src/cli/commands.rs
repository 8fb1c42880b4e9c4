pub mod chart;
pub mod clear_cache;

pub use chart::{chart, load_widget_state};
pub use clear_cache::clear_cache;
