//! Askama template structs for the exported map.

use askama::Template;

/// One drawable state.
pub struct Shape {
    pub state: String,
    pub category: &'static str,
    pub fill: &'static str,
    pub path: String,
    /// Hover text as joined, with `<br>` separators.
    pub hover_text: String,
    /// Plain-text fallback for the SVG `<title>` element.
    pub tooltip: String,
}

/// Legend entry for a color category.
pub struct LegendItem {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Template)]
#[template(path = "choropleth.html")]
pub struct ChoroplethTemplate {
    pub title: &'static str,
    pub legend_title: &'static str,
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub shapes: Vec<Shape>,
    pub legend: Vec<LegendItem>,
}
