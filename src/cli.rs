use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depview")]
#[command(about = "Interactive dashboard for project dependency graphs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the interactive dashboard (default behavior)
    Serve(ServeArgs),

    /// Fetch the graph once and write the view to a file
    Export(ExportArgs),

    /// Generate a starter .depview.toml configuration file
    Init(InitArgs),
}

/// Where the graph comes from. Flags override `.depview.toml`.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory containing .depview.toml (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// GraphQL endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Project to load
    #[arg(long)]
    pub project_id: Option<i64>,

    /// Version of the project to load
    #[arg(long)]
    pub version_id: Option<String>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("."),
            endpoint: None,
            project_id: None,
            version_id: None,
            timeout: None,
        }
    }
}

/// Initial selections. Unset flags fall back to the `[view]` config section.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Graph layout (cose, grid, circle, breadthfirst)
    #[arg(long)]
    pub layout: Option<String>,

    /// Node filter (all, unit, container)
    #[arg(long)]
    pub filter: Option<String>,

    /// Edge kind to highlight (none, membership, dependency, hierarchy)
    #[arg(long)]
    pub highlight: Option<String>,

    /// Keep every node at the base padding
    #[arg(long)]
    pub no_padding: bool,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Port for HTTP server
    #[arg(long)]
    pub port: Option<u16>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: ExportFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create .depview.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// The view payload as JSON
    #[default]
    Json,
    /// A self-contained dashboard page
    Html,
}
