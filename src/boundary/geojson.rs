//! GeoJSON FeatureCollection parsing.
//!
//! Only what the map needs is modelled: each feature's `properties.name` and
//! its polygon geometry. Other geometry types parse as [`Geometry::Unsupported`].

use serde::Deserialize;
use serde_json::{Map, Value};

/// A `[longitude, latitude, ...]` position. Extra ordinates are ignored.
pub type Position = Vec<f64>;

/// A closed ring of positions.
pub type Ring = Vec<Position>;

/// An exterior ring followed by zero or more holes.
pub type Polygon = Vec<Ring>;

/// Feature geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Polygon },
    MultiPolygon { coordinates: Vec<Polygon> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// All polygons in this geometry, in document order.
    pub fn polygons(&self) -> Vec<&Polygon> {
        match self {
            Geometry::Polygon { coordinates } => vec![coordinates],
            Geometry::MultiPolygon { coordinates } => coordinates.iter().collect(),
            Geometry::Unsupported => Vec::new(),
        }
    }
}

/// Raw top-level document as it appears on the wire. Anything other than a
/// FeatureCollection with a `features` array is rejected.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum RawDocument {
    FeatureCollection { features: Vec<RawFeature> },
}

/// Raw feature before the name key is extracted.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFeature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl RawFeature {
    /// String value of `properties.<key>`, if present.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }
}
