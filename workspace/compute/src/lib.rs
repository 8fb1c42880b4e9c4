//! Data pipelines behind the dashboard charts.
//!
//! - [`transform`] reshapes raw backend records into a [`common::ChartConfig`]
//! - [`cache`] is the two-tier (volatile + durable) expiring cache
//! - [`pipeline`] wires fetching, caching and transforming together
//! - [`presenter`] is the loading / ready / error state machine of a widget

pub mod cache;
pub mod error;
pub mod pipeline;
pub mod presenter;
pub mod transform;
