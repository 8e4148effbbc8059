//! `spirit card` command implementation.
//!
//! Reads a card as JSON and formats its flavor text and every skill
//! section, highlighting the card's own skill titles.

use std::fmt::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::{Deserialize, Deserializer, Serialize};
use spirit_format::{AssetMode, Formatter, HtmlRenderer, Node, escape_html};

use super::{GlobalArgs, asset_mode, formatter};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the card command.
#[derive(Args)]
pub(crate) struct CardArgs {
    /// Card JSON file.
    file: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = CardOutput::Html)]
    output: CardOutput,

    /// Use raster icon assets in HTML output.
    #[arg(long)]
    export: bool,

    /// Icon asset base (overrides config).
    #[arg(long, env = "SPIRIT_ICON_BASE")]
    base_url: Option<String>,
}

/// How a formatted card is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CardOutput {
    /// Card markup.
    Html,
    /// Formatted node trees as JSON.
    Json,
}

/// A card as authored.
#[derive(Debug, Deserialize)]
pub(crate) struct Card {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Skill {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A skill section: plain text, or text laid out in columns.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Section {
    Text(String),
    Columns {
        #[serde(default)]
        text: String,
        #[serde(default = "single_column", deserialize_with = "column_count")]
        cols: u32,
    },
}

fn single_column() -> u32 {
    1
}

/// Column count as a positive integer or a numeric string; anything else
/// (zero, negative, fractional, `null`, garbage) falls back to one column.
fn column_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let count = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(count.filter(|&n| n > 0).unwrap_or(1))
}

impl Section {
    fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Columns { text, .. } => text,
        }
    }

    fn cols(&self) -> Option<u32> {
        match self {
            Self::Text(_) => None,
            Self::Columns { cols, .. } => Some(*cols),
        }
    }
}

/// A card with every text field formatted.
#[derive(Debug, Serialize)]
pub(crate) struct FormattedCard {
    pub name: String,
    pub flavor: Vec<Node>,
    pub skills: Vec<FormattedSkill>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormattedSkill {
    pub title: String,
    pub sections: Vec<FormattedSection>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormattedSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<u32>,
    pub nodes: Vec<Node>,
}

impl Card {
    /// Non-empty skill titles, used as keyword titles.
    pub(crate) fn keywords(&self) -> Vec<&str> {
        self.skills
            .iter()
            .map(|skill| skill.title.trim())
            .filter(|title| !title.is_empty())
            .collect()
    }

    /// Format the flavor text and every skill section.
    pub(crate) fn format(&self, formatter: &Formatter) -> FormattedCard {
        let keywords = self.keywords();
        FormattedCard {
            name: self.name.clone(),
            flavor: formatter.format(&self.flavor, &keywords),
            skills: self
                .skills
                .iter()
                .map(|skill| FormattedSkill {
                    title: skill.title.clone(),
                    sections: skill
                        .sections
                        .iter()
                        .map(|section| FormattedSection {
                            cols: section.cols(),
                            nodes: formatter.format(section.text(), &keywords),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl FormattedCard {
    /// Card markup: name, flavor paragraph and one block per skill.
    pub(crate) fn to_html(&self, mode: AssetMode) -> String {
        let renderer = HtmlRenderer::new(mode);
        let mut html = String::from(r#"<article class="card">"#);

        if !self.name.is_empty() {
            let _ = write!(html, "<h2>{}</h2>", escape_html(&self.name));
        }
        if !self.flavor.is_empty() {
            html.push_str(r#"<p class="flavor">"#);
            renderer.render_into(&self.flavor, &mut html);
            html.push_str("</p>");
        }
        for skill in &self.skills {
            html.push_str(r#"<section class="skill">"#);
            if !skill.title.trim().is_empty() {
                let _ = write!(html, "<h3>{}</h3>", escape_html(&skill.title));
            }
            for section in &skill.sections {
                match section.cols {
                    Some(cols) => {
                        let _ = write!(
                            html,
                            r#"<p class="skill-text" style="column-count: {cols}">"#
                        );
                    }
                    None => html.push_str(r#"<p class="skill-text">"#),
                }
                renderer.render_into(&section.nodes, &mut html);
                html.push_str("</p>");
            }
            html.push_str("</section>");
        }

        html.push_str("</article>");
        html
    }
}

impl CardArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(self.base_url)?;

        let content = std::fs::read_to_string(&self.file)?;
        let card: Card = serde_json::from_str(&content)?;
        if global.verbose {
            output.info(&format!(
                "Formatting card {:?} with {} skill(s)",
                card.name,
                card.skills.len()
            ));
        }

        let formatted = card.format(&formatter(&config));
        let rendered = match self.output {
            CardOutput::Html => formatted.to_html(asset_mode(self.export)),
            CardOutput::Json => serde_json::to_string_pretty(&formatted)?,
        };
        output.result(&rendered)?;
        Ok(())
    }
}
