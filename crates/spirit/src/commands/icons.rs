//! `spirit icons` command implementation.

use clap::Args;
use spirit_format::IconRegistry;

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the icons command.
#[derive(Args)]
pub(crate) struct IconsArgs {
    /// Icon asset base (overrides config).
    #[arg(long, env = "SPIRIT_ICON_BASE")]
    base_url: Option<String>,

    /// Print raster references instead of vector ones.
    #[arg(long)]
    export: bool,
}

impl IconsArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(self.base_url)?;
        let registry = config.icon_registry();

        output.highlight(&format!("{} icons", registry.len()));
        for line in listing(&registry, self.export) {
            output.result(&line)?;
        }
        Ok(())
    }
}

/// One `:name:  reference` line per icon, names aligned.
fn listing(registry: &IconRegistry, export: bool) -> Vec<String> {
    let width = registry.iter().map(|icon| icon.name.len()).max().unwrap_or(0) + 2;
    registry
        .iter()
        .map(|icon| {
            let reference = if export { &icon.raster } else { &icon.vector };
            format!("{:<width$}  {reference}", format!(":{}:", icon.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spirit_format::IconAsset;

    #[test]
    fn test_listing_aligns_names() {
        let registry = IconRegistry::empty()
            .with_icon(IconAsset::new("gem", "/i/gem.svg", "/i/gem.png"))
            .with_icon(IconAsset::new("skull", "/i/skull.svg", "/i/skull.png"));
        assert_eq!(
            listing(&registry, false),
            vec![
                ":gem:    /i/gem.svg".to_owned(),
                ":skull:  /i/skull.svg".to_owned(),
            ]
        );
    }

    #[test]
    fn test_listing_export_uses_raster() {
        let registry =
            IconRegistry::empty().with_icon(IconAsset::new("gem", "/i/gem.svg", "/i/gem.png"));
        assert_eq!(listing(&registry, true), vec![":gem:  /i/gem.png".to_owned()]);
    }
}
