//! State boundary loading.
//!
//! Boundaries come from a GeoJSON FeatureCollection, fetched over HTTP or read
//! from disk. Features are keyed by `properties.name`.

mod geojson;

pub use geojson::{Geometry, Polygon, Position, Ring};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{MapError, MapResult};
use crate::http_client::HttpClient;

/// Public GeoJSON of U.S. state boundaries.
pub const DEFAULT_BOUNDARY_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

/// Property used to key features to state names.
pub const FEATURE_ID_KEY: &str = "name";

/// Where boundary data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundarySource {
    Url(url::Url),
    Path(PathBuf),
}

impl BoundarySource {
    /// Interpret a string as an http(s) URL, or else as a filesystem path.
    pub fn parse(input: &str) -> Self {
        match url::Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => BoundarySource::Url(url),
            _ => {
                let expanded = shellexpand::tilde(input);
                BoundarySource::Path(PathBuf::from(expanded.as_ref()))
            }
        }
    }
}

impl Default for BoundarySource {
    fn default() -> Self {
        BoundarySource::parse(DEFAULT_BOUNDARY_URL)
    }
}

impl fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundarySource::Url(url) => write!(f, "{}", url),
            BoundarySource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A named state boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub name: String,
    pub geometry: Option<Geometry>,
}

impl BoundaryFeature {
    /// Polygons to draw; empty when the geometry is missing or unsupported.
    pub fn polygons(&self) -> Vec<&Polygon> {
        self.geometry
            .as_ref()
            .map(Geometry::polygons)
            .unwrap_or_default()
    }
}

/// All boundary features from one document, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundarySet {
    pub features: Vec<BoundaryFeature>,
}

impl BoundarySet {
    /// Parse a GeoJSON FeatureCollection. Documents of any other shape,
    /// including error payloads served with a success status, are rejected.
    ///
    /// `origin` names the source in error messages. Features without a string
    /// name property cannot be keyed and are skipped.
    pub fn from_slice(bytes: &[u8], origin: &str) -> MapResult<Self> {
        let geojson::RawDocument::FeatureCollection { features: raw } =
            serde_json::from_slice(bytes).map_err(|source| MapError::Json {
                origin: origin.to_string(),
                source,
            })?;

        let total = raw.len();
        let features: Vec<BoundaryFeature> = raw
            .into_iter()
            .filter_map(|feature| {
                let name = feature.property_str(FEATURE_ID_KEY)?.to_string();
                Some(BoundaryFeature {
                    name,
                    geometry: feature.geometry,
                })
            })
            .collect();

        if features.len() < total {
            tracing::debug!(
                "Skipped {} unnamed features from {}",
                total - features.len(),
                origin
            );
        }

        Ok(Self { features })
    }

    /// Feature names, in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    /// Look up a feature by name.
    pub fn get(&self, name: &str) -> Option<&BoundaryFeature> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Fetches and parses boundary data.
#[derive(Clone)]
pub struct BoundaryLoader {
    client: HttpClient,
}

impl BoundaryLoader {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Load boundaries from a URL or file. Any failure is returned as-is; there
    /// is no retry.
    pub async fn load(&self, source: &BoundarySource) -> MapResult<BoundarySet> {
        let origin = source.to_string();
        let bytes = match source {
            BoundarySource::Url(url) => self.client.get_bytes(url.as_str()).await?,
            BoundarySource::Path(path) => read_file(path).await?,
        };

        let set = BoundarySet::from_slice(&bytes, &origin)?;
        tracing::info!("Loaded {} boundary features from {}", set.len(), origin);
        Ok(set)
    }
}

async fn read_file(path: &Path) -> MapResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| MapError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type":"Feature","id":"48","properties":{"name":"Texas"},
             "geometry":{"type":"Polygon","coordinates":[[[-106.6,32.0],[-94.0,33.5],[-97.1,26.0],[-106.6,32.0]]]}},
            {"type":"Feature","properties":{"density":1.0},"geometry":null},
            {"type":"Feature","properties":{"name":"California"},
             "geometry":{"type":"MultiPolygon","coordinates":[[[[-124.2,42.0],[-114.6,34.9],[-117.1,32.5],[-124.2,42.0]]]]}}
        ]
    }"#;

    #[test]
    fn test_from_slice_keeps_named_features_in_order() {
        let set = BoundarySet::from_slice(SAMPLE.as_bytes(), "sample").unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["Texas", "California"]);
        assert_eq!(set.get("Texas").unwrap().polygons().len(), 1);
        assert!(set.get("Ohio").is_none());
    }

    #[test]
    fn test_from_slice_rejects_invalid_json() {
        let err = BoundarySet::from_slice(b"not json", "bad.json").unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_from_slice_rejects_non_collection_payload() {
        let err = BoundarySet::from_slice(br#"{"message":"rate limited"}"#, "api").unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));

        let err = BoundarySet::from_slice(br#"{"type":"FeatureCollection"}"#, "api").unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));
    }

    #[test]
    fn test_empty_collection() {
        let set = BoundarySet::from_slice(br#"{"type":"FeatureCollection","features":[]}"#, "x")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            BoundarySource::parse("https://example.com/states.json"),
            BoundarySource::Url(_)
        ));
        assert_eq!(
            BoundarySource::parse("data/states.json"),
            BoundarySource::Path(PathBuf::from("data/states.json"))
        );
        assert_eq!(
            BoundarySource::default().to_string(),
            DEFAULT_BOUNDARY_URL
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let loader = BoundaryLoader::new(HttpClient::new(None, None).unwrap());
        let set = loader.load(&BoundarySource::Path(path)).await.unwrap();
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let loader = BoundaryLoader::new(HttpClient::new(None, None).unwrap());
        let err = loader
            .load(&BoundarySource::Path(PathBuf::from("/nonexistent/states.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }
}
