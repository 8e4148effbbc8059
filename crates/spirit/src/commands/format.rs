//! `spirit format` command implementation.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Args;

use super::{GlobalArgs, OutputFormat, asset_mode, formatter, render_nodes};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the format command.
#[derive(Args)]
pub(crate) struct FormatArgs {
    /// Text file to format (default: read stdin).
    file: Option<PathBuf>,

    /// Keyword title to highlight; repeat for several.
    #[arg(short, long = "keyword", value_name = "TITLE")]
    keywords: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Use raster icon assets in HTML output.
    #[arg(long)]
    export: bool,

    /// Icon asset base (overrides config).
    #[arg(long, env = "SPIRIT_ICON_BASE")]
    base_url: Option<String>,
}

impl FormatArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(self.base_url)?;

        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let stdin = std::io::stdin();
                if stdin.is_terminal() {
                    return Err(CliError::Validation(
                        "No input: pass a FILE or pipe text on stdin".to_owned(),
                    ));
                }
                std::io::read_to_string(stdin)?
            }
        };

        if global.verbose {
            output.info(&format!(
                "Formatting {} bytes with {} keyword title(s)",
                text.len(),
                self.keywords.len()
            ));
        }

        let nodes = formatter(&config).format(&text, &self.keywords);
        let rendered = render_nodes(&nodes, self.output, asset_mode(self.export))?;
        output.result(&rendered)?;
        Ok(())
    }
}
