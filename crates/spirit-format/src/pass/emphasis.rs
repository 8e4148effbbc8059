//! `*bold*` and `_italic_`, one line at most.

use super::{Hit, Matcher, Pass, PassContext, Replacement};
use crate::node::Node;

pub(crate) fn bold() -> Pass {
    Pass::new("md-bold", Matcher::regex(r"\*([^*\n]+)\*"), render_bold)
}

fn render_bold(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    Replacement::Nodes(vec![Node::Bold(vec![Node::text(hit.group(1))])])
}

pub(crate) fn italic() -> Pass {
    Pass::new("md-italic", Matcher::regex(r"_([^_\n]+)_"), render_italic)
}

fn render_italic(hit: &Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
    Replacement::Nodes(vec![Node::Italic(vec![Node::text(hit.group(1))])])
}
