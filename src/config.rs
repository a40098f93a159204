//! Configuration management for consentmap using the prefer crate.
//!
//! Settings are layered: built-in defaults, then a config file (auto-discovered
//! or given explicitly), then whatever the CLI overrides. The legislation
//! table is not configurable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::boundary::{BoundarySource, DEFAULT_BOUNDARY_URL};
use crate::error::{MapError, MapResult};

/// Name used for config file discovery.
pub const CONFIG_NAME: &str = "consentmap";

/// Default output filename.
pub const DEFAULT_OUTPUT_FILENAME: &str = "active_consent_map.html";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where boundary GeoJSON is read from.
    pub boundary: BoundarySource,
    /// Path of the exported HTML file.
    pub output_path: PathBuf,
    /// Open the exported file in the default viewer.
    pub open_viewer: bool,
    /// User agent for HTTP requests (None = default).
    pub user_agent: Option<String>,
    /// Request timeout in seconds (None = wait indefinitely).
    pub request_timeout: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boundary: BoundarySource::parse(DEFAULT_BOUNDARY_URL),
            output_path: default_output_path(),
            open_viewer: true,
            user_agent: None,
            request_timeout: None,
        }
    }
}

impl Settings {
    /// Request timeout as a duration, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Default export location under the user's documents directory.
///
/// Falls back gracefully: Documents dir -> Home dir -> Current dir
pub fn default_output_path() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Coding")
        .join("Actionaly Map")
        .join(DEFAULT_OUTPUT_FILENAME)
}

/// Configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Boundary URL or file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    /// Output HTML path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Whether to open the viewer after writing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Path the config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no config file is found or it fails to parse.
    pub async fn load() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> MapResult<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MapError::io(path, e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> MapResult<Self> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| MapError::Config(format!("Failed to parse TOML config: {}", e))),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| MapError::Config(format!("Failed to parse YAML config: {}", e))),
            _ => serde_json::from_str(contents)
                .map_err(|e| MapError::Config(format!("Failed to parse JSON config: {}", e))),
        }
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref boundary) = self.boundary {
            settings.boundary = match BoundarySource::parse(boundary) {
                BoundarySource::Path(_) => {
                    BoundarySource::Path(self.resolve_path(boundary, base_dir))
                }
                url => url,
            };
        }
        if let Some(ref output) = self.output {
            settings.output_path = self.resolve_path(output, base_dir);
        }
        if let Some(open) = self.open {
            settings.open_viewer = open;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = Some(timeout);
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings from defaults and the config file.
///
/// An explicit config path that cannot be read or parsed is an error;
/// a broken auto-discovered file is logged and ignored.
pub async fn load_settings_with_options(options: LoadOptions) -> MapResult<(Settings, Config)> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);

    if let Some(ref path) = config.source_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.boundary.to_string(), DEFAULT_BOUNDARY_URL);
        assert!(settings.open_viewer);
        assert!(settings.timeout().is_none());
        assert!(settings.output_path.ends_with("Actionaly Map/active_consent_map.html"));
    }

    #[test]
    fn test_parse_formats() {
        let toml = Config::parse("output = \"map.html\"\nopen = false\n", "toml").unwrap();
        assert_eq!(toml.output.as_deref(), Some("map.html"));
        assert_eq!(toml.open, Some(false));

        let yaml = Config::parse("request_timeout: 30\n", "yaml").unwrap();
        assert_eq!(yaml.request_timeout, Some(30));

        let json = Config::parse(r#"{"user_agent": "Bot/1.0"}"#, "json").unwrap();
        assert_eq!(json.user_agent.as_deref(), Some("Bot/1.0"));

        assert!(matches!(
            Config::parse("{", "json"),
            Err(MapError::Config(_))
        ));
    }

    #[test]
    fn test_apply_resolves_relative_paths() {
        let config = Config {
            boundary: Some("data/us-states.json".to_string()),
            output: Some("out/map.html".to_string()),
            open: Some(false),
            request_timeout: Some(0),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv/maps"));

        assert_eq!(
            settings.boundary,
            BoundarySource::Path(PathBuf::from("/srv/maps/data/us-states.json"))
        );
        assert_eq!(settings.output_path, PathBuf::from("/srv/maps/out/map.html"));
        assert!(!settings.open_viewer);
        // Zero means no timeout
        assert!(settings.timeout().is_none());
    }

    #[test]
    fn test_apply_keeps_urls() {
        let config = Config {
            boundary: Some("https://example.com/states.json".to_string()),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv/maps"));
        assert_eq!(settings.boundary.to_string(), "https://example.com/states.json");
    }

    #[tokio::test]
    async fn test_explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consentmap.toml");
        std::fs::write(&path, "output = \"map.html\"\n").unwrap();

        let (settings, config) = load_settings_with_options(LoadOptions {
            config_path: Some(path.clone()),
        })
        .await
        .unwrap();

        assert_eq!(config.source_path, Some(path));
        assert_eq!(settings.output_path, dir.path().join("map.html"));
    }

    #[tokio::test]
    async fn test_missing_explicit_config_is_error() {
        let result = load_settings_with_options(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/consentmap.toml")),
        })
        .await;
        assert!(matches!(result, Err(MapError::Io { .. })));
    }
}
