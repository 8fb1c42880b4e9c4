//! Translation of a [`ChartConfig`] into Plotly traces and layout.

use common::{ChartConfig, ChartType, Series};
use plotly::common::{AxisSide, Fill, Line, Marker, Mode, Title};
use plotly::layout::{Axis, RangeMode};
use plotly::{Bar, Layout, Scatter, Trace};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);

    #[wasm_bindgen(js_namespace = Plotly, catch)]
    fn redraw(div_id: &str) -> Result<(), JsValue>;
}

const STACK_GROUP: &str = "stack";

fn axis_ref(y_axis: usize) -> &'static str {
    if y_axis == 0 {
        "y"
    } else {
        "y2"
    }
}

/// Plotly stacks and lists traces in insertion order, so series are emitted
/// by their legend position first and their draw order second.
fn ordered_series(config: &ChartConfig) -> Vec<&Series> {
    let mut series: Vec<&Series> = config.series.iter().collect();
    series.sort_by_key(|s| {
        (
            s.legend_index.unwrap_or(usize::MAX),
            s.index.unwrap_or(usize::MAX),
        )
    });
    series
}

pub fn build_traces(config: &ChartConfig) -> Vec<Box<dyn Trace>> {
    let categories = config.categories().to_vec();
    let stacked = config.stacking.is_some();

    ordered_series(config)
        .into_iter()
        .map(|series| -> Box<dyn Trace> {
            let x = categories.clone();
            let y = series.data.clone();
            let name = series.name.as_str();
            let axis = axis_ref(series.y_axis);

            match series.series_type {
                ChartType::Column => Bar::new(x, y)
                    .name(name)
                    .marker(Marker::new().color(series.color.clone()))
                    .y_axis(axis),
                ChartType::Line => Scatter::new(x, y)
                    .mode(Mode::LinesMarkers)
                    .name(name)
                    .line(Line::new().color(series.color.clone()).width(2.0))
                    .y_axis(axis),
                ChartType::Area => {
                    let trace = Scatter::new(x, y)
                        .mode(Mode::Lines)
                        .name(name)
                        .fill(Fill::ToNextY)
                        .line(Line::new().color(series.color.clone()))
                        .y_axis(axis);
                    if stacked {
                        trace.stack_group(STACK_GROUP)
                    } else {
                        trace
                    }
                }
            }
        })
        .collect()
}

pub fn build_layout(config: &ChartConfig) -> Layout {
    let title = match &config.subtitle {
        Some(subtitle) => format!("{}<br><sup>{}</sup>", config.title.text, subtitle.text),
        None => config.title.text.clone(),
    };

    let mut x_axis = Axis::new();
    if let Some(axis_title) = &config.x_axis.title {
        x_axis = x_axis.title(Title::with_text(axis_title.text.as_str()));
    }
    if let Some(rotation) = config.x_axis.label_rotation {
        x_axis = x_axis.tick_angle(rotation as f64);
    }
    if let Some(interval) = config.tick_interval() {
        x_axis = x_axis.dtick(interval as f64);
    }

    let mut layout = Layout::new()
        .title(Title::with_text(title.as_str()))
        .height(config.chart.height as usize)
        .x_axis(x_axis);

    if let Some(background) = &config.chart.background_color {
        layout = layout
            .paper_background_color(background.clone())
            .plot_background_color(background.clone());
    }

    for (idx, y) in config.y_axis.iter().enumerate() {
        let mut axis = Axis::new();
        if let Some(axis_title) = &y.title {
            axis = axis.title(Title::with_text(axis_title.text.as_str()));
        }
        if y.min == Some(0.0) {
            axis = axis.range_mode(RangeMode::NonNegative);
        }
        if let Some(color) = &y.label_color {
            axis = axis.color(color.clone());
        }
        if let Some(color) = &y.grid_line_color {
            axis = axis.grid_color(color.clone());
        }
        if y.opposite {
            axis = axis.overlaying("y").side(AxisSide::Right);
        }

        layout = match idx {
            0 => layout.y_axis(axis),
            1 => layout.y_axis2(axis),
            _ => {
                log::warn!("Ignoring y axis {} of '{}'", idx, config.title.text);
                layout
            }
        };
    }

    layout
}

/// Draws `config` into the element with id `div_id`.
pub fn render(div_id: &str, config: &ChartConfig) -> Result<(), String> {
    log::trace!("Rendering '{}' into #{}", config.title.text, div_id);

    let data_js = js_sys::Array::new();
    for trace in build_traces(config) {
        let trace_js = js_sys::JSON::parse(&trace.to_json())
            .map_err(|e| format!("Failed to convert trace: {:?}", e))?;
        data_js.push(&trace_js);
    }

    let layout_json = serde_json::to_string(&build_layout(config))
        .map_err(|e| format!("Failed to serialize layout: {}", e))?;
    let layout_js = js_sys::JSON::parse(&layout_json)
        .map_err(|e| format!("Failed to convert layout: {:?}", e))?;

    newPlot(div_id, data_js.into(), layout_js);
    Ok(())
}

/// Forces Plotly to recompute the layout of an already drawn chart.
pub fn redraw_chart(div_id: &str) {
    log::trace!("Redrawing #{}", div_id);
    if let Err(e) = redraw(div_id) {
        log::warn!("Plotly redraw of #{} failed: {:?}", div_id, e);
    }
}
