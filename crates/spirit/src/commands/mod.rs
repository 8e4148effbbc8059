//! CLI command implementations.

pub(crate) mod card;
pub(crate) mod format;
pub(crate) mod icons;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use spirit_config::{CliSettings, Config};
use spirit_format::{AssetMode, Formatter, HtmlRenderer, Node, plain_text};

use crate::error::CliError;

pub(crate) use card::CardArgs;
pub(crate) use format::FormatArgs;
pub(crate) use icons::IconsArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover spirit.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every format pass (overrides config).
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    /// Load configuration with the global overrides applied.
    pub(crate) fn load_config(&self, base_url: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            debug: self.debug.then_some(true),
            base_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }
}

/// Formatter built from the configuration.
pub(crate) fn formatter(config: &Config) -> Formatter {
    Formatter::with_icons(config.icon_registry()).with_config(config.formatter_config())
}

/// How formatted nodes are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Plain text.
    #[default]
    Text,
    /// Inline HTML.
    Html,
    /// Node tree as JSON.
    Json,
}

/// Icon assets for HTML output: raster when exporting.
pub(crate) fn asset_mode(export: bool) -> AssetMode {
    if export {
        AssetMode::Raster
    } else {
        AssetMode::Vector
    }
}

/// Render nodes in the requested output format.
pub(crate) fn render_nodes(
    nodes: &[Node],
    format: OutputFormat,
    mode: AssetMode,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Text => plain_text(nodes),
        OutputFormat::Html => HtmlRenderer::new(mode).render(nodes),
        OutputFormat::Json => serde_json::to_string_pretty(nodes)?,
    })
}
