//! Bold numerals.

use regex::Captures;

use super::{Hit, Matcher, Pass, PassContext, Replacement};
use crate::node::Node;

const SPIRIT_GLYPHS: &[char] = &['¤', '§', '◊', '◆', '◇'];

/// `+2`, `-3`, `- 1` after a non-word character.
pub(crate) fn signed_number() -> Pass {
    Pass::new(
        "signed-number",
        Matcher::regex_group(r"(^|[^A-Za-z0-9_])([+\-]\s*[0-9]+)", 2)
            .accepting(not_before_glyph),
        render_signed,
    )
    .title_guarded()
}

/// The digit run is maximal, so only a following glyph can reject it.
fn not_before_glyph(text: &str, caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| {
        !text[m.end()..]
            .trim_start()
            .starts_with(SPIRIT_GLYPHS)
    })
}

fn render_signed(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    let number: String = hit.group(2).split_whitespace().collect();
    Replacement::Nodes(vec![Node::Number(number)])
}

/// Integers and decimals standing on their own: `3`, `1.5`, `1,000`.
///
/// Numbers glued to a word character or `%` on either side are left alone.
pub(crate) fn any_number() -> Pass {
    Pass::new(
        "any-number",
        Matcher::regex_group(r"(^|[^A-Za-z0-9_%])([0-9]+(?:[.,][0-9]+)?)", 2)
            .accepting(not_glued_after),
        render_number,
    )
    .title_guarded()
}

fn not_glued_after(text: &str, caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| {
        !text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '%')
    })
}

fn render_number(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    Replacement::Nodes(vec![Node::Number(hit.group(2).to_owned())])
}
