pub mod chart_widget;
pub mod dashboard;
pub mod plotly_chart;
