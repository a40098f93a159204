//! Choropleth rendering to a self-contained HTML document.
//!
//! Each joined row is matched to its boundary feature by name and drawn as an
//! SVG path colored by its consent law category. Rows without a matching
//! feature are not drawn.

mod projection;
mod template;

pub use projection::{AlbersUsa, Bounds, Fit, Region};

use std::fmt::Write as _;
use std::path::Path;

use askama::Template;

use crate::boundary::{BoundarySet, Polygon};
use crate::error::{MapError, MapResult};
use crate::join::{StateRow, HOVER_BREAK};
use crate::legislation::ConsentLaw;

use template::{ChoroplethTemplate, LegendItem, Shape};

/// Chart title.
pub const TITLE: &str = "U.S. States with Active Consent Legislation (Past 5 Years)";

/// Legend heading, named after the color column.
pub const LEGEND_TITLE: &str = "consent_law";

/// Fill for states that passed a law.
pub const PASSED_COLOR: &str = "#FF7043";

/// Fill for all other states.
pub const NOT_PASSED_COLOR: &str = "#E0E0E0";

/// Drawing area size in pixels.
pub const WIDTH: u32 = 960;
pub const HEIGHT: u32 = 560;

/// Space reserved above the map for the title.
pub const MARGIN_TOP: u32 = 50;

const PADDING: f64 = 10.0;

/// Discrete color for a category.
pub fn category_color(law: ConsentLaw) -> &'static str {
    match law {
        ConsentLaw::Passed => PASSED_COLOR,
        ConsentLaw::NotPassed => NOT_PASSED_COLOR,
    }
}

/// A choropleth of joined rows over their boundary geometry.
pub struct Choropleth<'a> {
    rows: &'a [StateRow],
    boundaries: &'a BoundarySet,
    projection: AlbersUsa,
}

impl<'a> Choropleth<'a> {
    pub fn new(rows: &'a [StateRow], boundaries: &'a BoundarySet) -> Self {
        Self {
            rows,
            boundaries,
            projection: AlbersUsa::default(),
        }
    }

    /// Projected polygons for every row that has a boundary, in row order.
    fn projected(&self) -> Vec<(&'a StateRow, Vec<Vec<(f64, f64)>>)> {
        self.rows
            .iter()
            .filter_map(|row| {
                let feature = self.boundaries.get(&row.state)?;
                let rings = feature
                    .polygons()
                    .into_iter()
                    .flat_map(|polygon| self.project_polygon(polygon))
                    .collect::<Vec<_>>();
                Some((row, rings))
            })
            .collect()
    }

    /// Project every ring of a polygon through the panel of its first position.
    /// Polygons that start outside every panel are dropped.
    fn project_polygon(&self, polygon: &Polygon) -> Vec<Vec<(f64, f64)>> {
        let region = polygon
            .first()
            .and_then(|ring| ring.first())
            .and_then(|pos| match pos.as_slice() {
                [lon, lat, ..] => self.projection.locate(*lon, *lat),
                _ => None,
            });
        let Some(region) = region else {
            return Vec::new();
        };

        polygon
            .iter()
            .map(|ring| {
                ring.iter()
                    .filter_map(|pos| match pos.as_slice() {
                        [lon, lat, ..] => Some(self.projection.project_in(region, *lon, *lat)),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|ring| ring.len() >= 3)
            .collect()
    }

    /// Shapes ready for the template, fitted to the drawing area.
    fn shapes(&self) -> Vec<Shape> {
        let projected = self.projected();

        let mut bounds = Bounds::empty();
        for (_, rings) in &projected {
            for point in rings.iter().flatten() {
                bounds.extend(*point);
            }
        }
        let fit = Fit::to_viewport(&bounds, f64::from(WIDTH), f64::from(HEIGHT), PADDING);

        projected
            .into_iter()
            .filter(|(_, rings)| !rings.is_empty())
            .map(|(row, rings)| Shape {
                state: row.state.clone(),
                category: row.consent_law.label(),
                fill: category_color(row.consent_law),
                path: svg_path(&rings, &fit),
                hover_text: row.hover_text.clone(),
                tooltip: row.hover_text.replace(HOVER_BREAK, "\n"),
            })
            .collect()
    }

    /// Render the chart as a complete HTML document.
    pub fn to_html(&self) -> MapResult<String> {
        let shapes = self.shapes();
        tracing::debug!("Rendering {} shapes", shapes.len());

        let template = ChoroplethTemplate {
            title: TITLE,
            legend_title: LEGEND_TITLE,
            width: WIDTH,
            height: HEIGHT,
            margin_top: MARGIN_TOP,
            shapes,
            legend: ConsentLaw::all()
                .into_iter()
                .map(|law| LegendItem {
                    label: law.label(),
                    color: category_color(law),
                })
                .collect(),
        };
        Ok(template.render()?)
    }

    /// Render and write the HTML document. Missing parent directories are an
    /// error; nothing is created besides the file itself.
    pub fn write_html(&self, path: &Path) -> MapResult<()> {
        let html = self.to_html()?;
        std::fs::write(path, html).map_err(|e| MapError::io(path, e))?;
        tracing::info!("Wrote map to {}", path.display());
        Ok(())
    }
}

/// SVG path data for a set of rings.
fn svg_path(rings: &[Vec<(f64, f64)>], fit: &Fit) -> String {
    let mut d = String::new();
    for ring in rings {
        for (i, point) in ring.iter().enumerate() {
            let (x, y) = fit.apply(*point);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.2},{:.2}", cmd, x, y);
        }
        d.push('Z');
    }
    d
}
