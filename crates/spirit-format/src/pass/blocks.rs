//! Line and block level markup: alignment, underline, rules and bullets.

use regex::{Captures, Regex};

use super::{Hit, Matcher, Pass, PassContext, Replacement};
use crate::node::{Align, Node};

/// `[l]...[/l]`, `[center]...[/center]`, `[r]...[/r]` and friends.
pub(crate) fn align() -> Pass {
    let opener = Regex::new(r"(?i)\[(l|left|c|center|r|right)\]").unwrap();
    Pass::new("align-blocks", Matcher::Tag { opener }, render_align).recursive()
}

fn render_align(hit: &Hit<'_>, cx: &PassContext<'_>) -> Replacement {
    Replacement::Nodes(vec![Node::Aligned {
        align: Align::from_tag(hit.group(1)),
        children: cx.format_nested(hit.group(2)),
    }])
}

/// `[u]...[/u]` and `[underline]...[/underline]`.
pub(crate) fn underline() -> Pass {
    let opener = Regex::new(r"(?i)\[(u|underline)\]").unwrap();
    Pass::new("underline", Matcher::Tag { opener }, render_underline).recursive()
}

fn render_underline(hit: &Hit<'_>, cx: &PassContext<'_>) -> Replacement {
    Replacement::Nodes(vec![Node::Underline(cx.format_nested(hit.group(2)))])
}

/// A line of three or more hyphens.
pub(crate) fn rule() -> Pass {
    Pass::new(
        "md-hr",
        Matcher::regex(r"(^|\r?\n)[ \t]*-{3,}[ \t]*(\r?\n|$)"),
        render_rule,
    )
}

/// The surrounding newlines are consumed with the rule line and come back
/// as explicit breaks, so no blank text is left behind.
fn render_rule(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    let mut nodes = Vec::with_capacity(3);
    if !hit.group(1).is_empty() {
        nodes.push(Node::LineBreak);
    }
    nodes.push(Node::Rule);
    if !hit.group(2).is_empty() {
        nodes.push(Node::LineBreak);
    }
    Replacement::Nodes(nodes)
}

/// `- item` at the start of a line. A single hyphen only, so `---` stays a rule.
pub(crate) fn bullets() -> Pass {
    Pass::new(
        "bullets",
        Matcher::regex(r"(^|\r?\n)\s*-\s+").accepting(followed_by_text),
        render_bullet,
    )
}

/// The whitespace run after the hyphen must end before a non-space character.
fn followed_by_text(text: &str, caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| m.end() < text.len())
}

/// A break replaces the newline the match started on; a bullet at the start
/// of the text gets none, and blank lines swallowed by `\s*` are dropped.
fn render_bullet(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    if hit.group(1).is_empty() {
        Replacement::Nodes(vec![Node::Bullet])
    } else {
        Replacement::Nodes(vec![Node::LineBreak, Node::Bullet])
    }
}
