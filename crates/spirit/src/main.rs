//! Spirit CLI - card text formatting.
//!
//! Provides commands for:
//! - `format`: Format card text from a file or stdin
//! - `card`: Format every text field of a card JSON file
//! - `icons`: List the icon shortcodes known to the formatter

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CardArgs, FormatArgs, GlobalArgs, IconsArgs};
use output::Output;

/// Spirit - card text formatting.
#[derive(Parser)]
#[command(name = "spirit", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format card text.
    Format(FormatArgs),
    /// Format a card JSON file.
    Card(CardArgs),
    /// List available icon shortcodes.
    Icons(IconsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --debug shows the per-pass trace, --verbose enables INFO level,
    // otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.debug {
        EnvFilter::new("spirit_format=debug,info")
    } else if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Format(args) => args.execute(&cli.global),
        Commands::Card(args) => args.execute(&cli.global),
        Commands::Icons(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
