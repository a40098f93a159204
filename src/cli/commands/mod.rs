//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod render;
mod rows;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::boundary::BoundarySource;
use crate::config::{load_settings_with_options, LoadOptions, Settings};

#[derive(Parser)]
#[command(name = "consent-map")]
#[command(about = "Map U.S. states with active consent legislation")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Boundary GeoJSON URL or file path
    #[arg(long, global = true, env = "CONSENT_MAP_BOUNDARY")]
    boundary: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch boundaries, render the map, write HTML, and open it (default)
    Render,

    /// Print the joined state rows without rendering
    Rows {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Output HTML path
    #[arg(short, long, global = true, env = "CONSENT_MAP_OUTPUT")]
    output: Option<PathBuf>,

    /// Write the file without opening a viewer
    #[arg(long, global = true)]
    no_open: bool,
}

impl RenderArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref output) = self.output {
            let expanded = shellexpand::tilde(&output.to_string_lossy()).into_owned();
            settings.output_path = PathBuf::from(expanded);
        }
        if self.no_open {
            settings.open_viewer = false;
        }
    }
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (mut settings, _config) = load_settings_with_options(options).await?;

    if let Some(ref boundary) = cli.boundary {
        settings.boundary = BoundarySource::parse(boundary);
    }

    cli.render.apply(&mut settings);

    match cli.command {
        None | Some(Commands::Render) => render::cmd_render(&settings).await,
        Some(Commands::Rows { json }) => rows::cmd_rows(&settings, json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_render() {
        let cli = Cli::try_parse_from(["consent-map"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_render_args_override_settings() {
        let cli =
            Cli::try_parse_from(["consent-map", "render", "--output", "/tmp/map.html", "--no-open"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::Render)));

        let mut settings = Settings::default();
        cli.render.apply(&mut settings);
        assert_eq!(settings.output_path, PathBuf::from("/tmp/map.html"));
        assert!(!settings.open_viewer);
    }

    #[test]
    fn test_render_args_without_subcommand() {
        let cli = Cli::try_parse_from(["consent-map", "--no-open"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.render.no_open);
    }

    #[test]
    fn test_global_boundary_flag() {
        let cli =
            Cli::try_parse_from(["consent-map", "rows", "--json", "--boundary", "states.json"])
                .unwrap();
        assert_eq!(cli.boundary.as_deref(), Some("states.json"));
        assert!(matches!(cli.command, Some(Commands::Rows { json: true })));
    }
}
