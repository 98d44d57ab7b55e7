mod export;
mod init;
mod serve;

pub use export::{cmd_export, cmd_export_with_fs};
pub use init::{cmd_init, cmd_init_with_fs};
pub use serve::cmd_serve;

use crate::cli::{SourceArgs, ViewArgs};
use crate::config::Config;
use crate::fs::{FileSystem, default_fs};
use crate::layout::LayoutOptions;
use crate::style;
use crate::transform::TransformOptions;
use crate::view::ViewState;

/// Shared context for command execution: the merged configuration and the
/// view the command starts from.
pub struct CommandContext {
    pub config: Config,
    pub view: ViewState,
}

impl CommandContext {
    /// Load config and apply CLI overrides.
    /// Returns Err(exit_code) if the config file or a flag is invalid.
    pub fn new(source: &SourceArgs, view: &ViewArgs) -> Result<Self, i32> {
        Self::with_fs(source, view, default_fs())
    }

    pub fn with_fs(source: &SourceArgs, view: &ViewArgs, fs: &dyn FileSystem) -> Result<Self, i32> {
        // A missing file already yields defaults; a broken one is fatal.
        let mut config = Config::load_with_fs(&source.config_dir, fs).map_err(|e| {
            style::error(&format!("Failed to load config: {}", e));
            1
        })?;

        if let Some(endpoint) = &source.endpoint {
            config.source.endpoint = endpoint.clone();
        }
        if let Some(project_id) = source.project_id {
            config.source.project_id = project_id;
        }
        if let Some(version_id) = &source.version_id {
            config.source.version_id = version_id.clone();
        }
        if let Some(timeout) = source.timeout {
            config.source.timeout_secs = timeout;
        }

        if let Some(layout) = &view.layout {
            config.view.layout = layout.trim().to_string();
        }
        if let Some(filter) = &view.filter {
            config.view.filter = filter.parse().map_err(|e| {
                style::error(&format!("{}", e));
                1
            })?;
        }
        if let Some(highlight) = &view.highlight {
            config.view.highlight = highlight.parse().map_err(|e| {
                style::error(&format!("{}", e));
                1
            })?;
        }
        if view.no_padding {
            config.view.weighted_padding = false;
        }

        if !LayoutOptions::is_known(&config.view.layout) {
            style::warning(&format!(
                "Unknown layout '{}'; the renderer will receive it as-is",
                config.view.layout
            ));
        }

        let view = ViewState::new(
            config.view.layout.clone(),
            config.view.filter,
            config.view.highlight,
        );

        Ok(Self { config, view })
    }

    pub fn transform_options(&self) -> TransformOptions {
        self.config.view.transform_options()
    }
}
