//! Game term highlighting: the fixed keyword sets and caller keyword titles.

use std::sync::LazyLock;

use regex::Regex;

use super::{Hit, Matcher, Pass, PassContext, Replacement};
use crate::node::Node;

const NBSP: &str = "\u{00A0}";

static FIRST_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SPACE_BEFORE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+Range$").unwrap());

/// The fixed keyword passes, in the order they run.
pub(crate) fn fixed_keywords() -> Vec<Pass> {
    vec![
        Pass::new(
            "outcomes",
            Matcher::regex(
                r"(?-u:\b)(Good\s*Hit|Hit|Miss|Complication|Target|Resolve|RP)(?-u:\b)(\s*[:;,.!?])?",
            ),
            render_outcome,
        ),
        Pass::new(
            "attributes",
            Matcher::regex(r"(?-u:\b)(Finesse|Fortitude|Intellect|Persona)(?-u:\b)"),
            render_bold_term,
        ),
        Pass::new(
            "actions",
            Matcher::regex(r"(?-u:\b)(Action|Use|Test|Prepare|Stow)(?-u:\b)"),
            render_bold_term,
        ),
        Pass::new(
            "opportunities",
            Matcher::regex(r"(?-u:\b)(Dodge|Resist|Dash|Utilize|Discover|Opportunity)(?-u:\b)"),
            render_bold_term,
        ),
        Pass::new(
            "damage-types",
            Matcher::regex(
                r"(?-u:\b)(Blunt|Pierce|Slash|Mental|Burn|Freeze|Shock|Poison|Force|Radiant|Umbral|Wound|Heavy\s*Wound)(?-u:\b)",
            ),
            render_bold_term,
        ),
        Pass::new(
            "range-movement",
            Matcher::regex(
                r"(?-u:\b)(Striking\s*Range|Spitting\s*Range|Throwing\s*Range|Shooting\s*Range|Yonder|Pushing\s*the\s*Range|Movement|Move|Dash)(?-u:\b)(\s*[:;,.!?])?",
            ),
            render_range,
        ),
    ]
    .into_iter()
    .map(Pass::title_guarded)
    .collect()
}

fn no_break_bold(text: String) -> Replacement {
    Replacement::Nodes(vec![Node::NoBreak(vec![Node::Bold(vec![Node::Text(text)])])])
}

/// `Good Hit:` keeps its punctuation; the first space becomes non-breaking.
fn render_outcome(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    let term = FIRST_SPACE_RUN.replace(hit.group(1), NBSP);
    no_break_bold(format!("{term}{}", hit.group(2)))
}

/// The term exactly as written.
fn render_bold_term(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    no_break_bold(hit.group(0).to_owned())
}

fn render_range(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    let term = SPACE_BEFORE_RANGE.replace(hit.group(1), format!("{NBSP}Range"));
    let text = format!("{term}{}", hit.group(2));
    Replacement::Nodes(vec![Node::NoBreak(vec![Node::Italic(vec![Node::Text(text)])])])
}

/// Trimmed, non-empty keyword titles.
pub(crate) fn titles<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whole-word alternation of the literal titles, `None` when there are none.
///
/// Word boundaries are ASCII-only, so an accented letter does not glue a
/// title to its neighbour.
pub(crate) fn title_pattern(titles: &[String]) -> Option<Regex> {
    if titles.is_empty() {
        return None;
    }
    let alternation = titles
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?-u:\b)(?:{alternation})(?-u:\b)")).ok()
}

/// Highlights caller keyword titles.
pub(crate) fn title_keywords(pattern: Regex) -> Pass {
    Pass::new(
        "title-keywords",
        Matcher::Regex {
            re: pattern,
            target: 0,
            accept: None,
        },
        render_title,
    )
}

fn render_title(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    Replacement::Nodes(vec![Node::Keyword(hit.group(0).to_owned())])
}
