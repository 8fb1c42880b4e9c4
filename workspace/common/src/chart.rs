//! Renderer-neutral chart configuration.
//!
//! Field names serialize in camelCase so the stored JSON reads like a
//! regular charting-library options object. A configuration is built once by
//! a transformer and never mutated afterwards; it round-trips through the
//! durable cache tier unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Area,
    Column,
    Line,
}

/// How series of the same type pile up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stacking {
    /// Values are added on top of each other.
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    pub categories: Vec<String>,
    /// Show a label every `tick_interval` categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_interval: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Label rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_rotation: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Drawn on the right-hand side.
    #[serde(default)]
    pub opposite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_line_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    #[serde(rename = "type")]
    pub series_type: ChartType,
    /// One value per category, in category order.
    pub data: Vec<f64>,
    pub color: String,
    /// Draw order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_index: Option<usize>,
    /// Index into [`ChartConfig::y_axis`].
    #[serde(default)]
    pub y_axis: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub chart: ChartOptions,
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<Title>,
    pub x_axis: XAxis,
    pub y_axis: Vec<YAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking: Option<Stacking>,
    pub series: Vec<Series>,
}

impl ChartConfig {
    pub fn categories(&self) -> &[String] {
        &self.x_axis.categories
    }

    pub fn tick_interval(&self) -> Option<usize> {
        self.x_axis.tick_interval
    }

    /// Looks a series up by its display name.
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}
