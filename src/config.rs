use crate::fs::{FileSystem, default_fs};
use crate::layout::DEFAULT_LAYOUT;
use crate::selection::{EdgeHighlight, NodeFilter, ParseSelectionError};
use crate::transform::TransformOptions;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".depview.toml";

pub const DEFAULT_ENDPOINT: &str = "https://api-demo.arcan.tech/graphql";
pub const DEFAULT_PROJECT_ID: i64 = 287;
pub const DEFAULT_VERSION_ID: &str = "2e718ebd3f968a675dfbc36bb4a126e13186eddf";
pub const DEFAULT_PORT: u16 = 5173;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid view setting: {0}")]
    Selection(#[from] ParseSelectionError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub server: ServerConfig,
    pub view: ViewConfig,
}

/// Where the dependency graph comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub endpoint: String,
    pub project_id: i64,
    pub version_id: String,
    /// Request timeout in seconds; 0 waits forever.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub open: bool,
}

/// Selections a fresh dashboard starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub layout: String,
    pub filter: NodeFilter,
    pub highlight: EdgeHighlight,
    pub weighted_padding: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    source: Option<RawSource>,
    server: Option<RawServer>,
    view: Option<RawView>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    endpoint: Option<String>,
    project_id: Option<i64>,
    version_id: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    port: Option<u16>,
    open: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawView {
    layout: Option<String>,
    filter: Option<String>,
    highlight: Option<String>,
    weighted_padding: Option<bool>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: DEFAULT_PROJECT_ID,
            version_id: DEFAULT_VERSION_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            open: false,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            filter: NodeFilter::All,
            highlight: EdgeHighlight::None,
            weighted_padding: true,
        }
    }
}

impl ViewConfig {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            weighted_padding: self.weighted_padding,
        }
    }
}

impl Config {
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(project_path, default_fs())
    }

    pub fn load_with_fs(project_path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE_NAME);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let source = match raw.source {
            Some(s) => SourceConfig {
                endpoint: s.endpoint.unwrap_or(defaults.source.endpoint),
                project_id: s.project_id.unwrap_or(defaults.source.project_id),
                version_id: s.version_id.unwrap_or(defaults.source.version_id),
                timeout_secs: s.timeout_secs.unwrap_or(defaults.source.timeout_secs),
            },
            None => defaults.source,
        };

        let server = match raw.server {
            Some(s) => ServerConfig {
                port: s.port.unwrap_or(defaults.server.port),
                open: s.open.unwrap_or(defaults.server.open),
            },
            None => defaults.server,
        };

        let view = match raw.view {
            Some(v) => ViewConfig {
                layout: v.layout.unwrap_or(defaults.view.layout),
                filter: match v.filter {
                    Some(f) => f.parse()?,
                    None => defaults.view.filter,
                },
                highlight: match v.highlight {
                    Some(h) => h.parse()?,
                    None => defaults.view.highlight,
                },
                weighted_padding: v.weighted_padding.unwrap_or(defaults.view.weighted_padding),
            },
            None => defaults.view,
        };

        Ok(Self {
            source,
            server,
            view,
        })
    }
}

pub fn generate_config_template() -> String {
    format!(
        r#"# depview configuration

[source]
# GraphQL endpoint serving the dependency graph
endpoint = "{endpoint}"
project_id = {project_id}
version_id = "{version_id}"
# Request timeout in seconds (0 waits forever)
timeout_secs = {timeout}

[server]
port = {port}
open = false

[view]
# cose, grid, circle or breadthfirst
layout = "{layout}"
# all, unit or container
filter = "all"
# none, membership, dependency or hierarchy
highlight = "none"
# Grow node padding with incoming dependency weight
weighted_padding = true
"#,
        endpoint = DEFAULT_ENDPOINT,
        project_id = DEFAULT_PROJECT_ID,
        version_id = DEFAULT_VERSION_ID,
        timeout = DEFAULT_TIMEOUT_SECS,
        port = DEFAULT_PORT,
        layout = DEFAULT_LAYOUT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let fs = MockFs::new();
        let config = Config::load_with_fs(Path::new("/project"), &fs).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.source.project_id, 287);
        assert_eq!(config.server.port, 5173);
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let fs = MockFs::with_files([(
            Path::new("/project/.depview.toml"),
            r#"
[source]
project_id = 12
timeout_secs = 0

[view]
filter = "Container"
highlight = "hierarchy"
"#,
        )]);

        let config = Config::load_with_fs(Path::new("/project"), &fs).unwrap();
        assert_eq!(config.source.project_id, 12);
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.source.timeout(), None);
        assert_eq!(config.view.filter, NodeFilter::Container);
        assert_eq!(config.view.highlight, EdgeHighlight::Hierarchy);
        assert_eq!(config.view.layout, "cose");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let result = Config::parse("[view]\nfilter = \"files\"\n");
        assert!(matches!(result, Err(ConfigError::Selection(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            Config::parse("[source\nendpoint ="),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::parse(&generate_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_timeout_duration() {
        let source = SourceConfig::default();
        assert_eq!(source.timeout(), Some(Duration::from_secs(30)));
    }
}
