//! Rewrite passes.
//!
//! A [`Pass`] pairs a [`Matcher`] that finds markup in a raw span with a
//! renderer that turns one match into nodes. The formatter runs its passes
//! in a fixed order; see [`crate::Formatter`].

mod blocks;
mod emphasis;
mod icons;
mod keywords;
mod numbers;

use std::ops::Range;

use regex::{Captures, Regex};

use crate::formatter::Formatter;
use crate::node::Node;

pub(crate) use blocks::{align, bullets, rule, underline};
pub(crate) use emphasis::{bold, italic};
pub(crate) use icons::{shortcodes, spirit_glyph, spirit_modifier};
pub(crate) use keywords::{fixed_keywords, title_keywords, title_pattern, titles};
pub(crate) use numbers::{any_number, signed_number};

/// Decides whether a regex candidate really matches.
///
/// Receives the whole span and the candidate's captures; stands in for
/// look-around the `regex` crate does not support.
pub(crate) type AcceptFn = fn(&str, &Captures<'_>) -> bool;

/// Turns one match into its replacement.
pub(crate) type RenderFn = fn(&Hit<'_>, &PassContext<'_>) -> Replacement;

/// How a pass finds its markup.
pub(crate) enum Matcher {
    /// Regex match, optionally filtered.
    ///
    /// Only capture group `target` is replaced; text matched outside of it
    /// acts as context and is kept as raw text.
    Regex {
        re: Regex,
        target: usize,
        accept: Option<AcceptFn>,
    },
    /// `[tag]...[/tag]` block whose closer repeats the opener's tag.
    Tag { opener: Regex },
}

impl Matcher {
    /// Regex matcher replacing the whole match.
    pub(crate) fn regex(pattern: &str) -> Self {
        Self::Regex {
            re: Regex::new(pattern).unwrap(),
            target: 0,
            accept: None,
        }
    }

    /// Regex matcher replacing only capture group `target`.
    pub(crate) fn regex_group(pattern: &str, target: usize) -> Self {
        Self::Regex {
            re: Regex::new(pattern).unwrap(),
            target,
            accept: None,
        }
    }

    /// Add an acceptance check.
    pub(crate) fn accepting(self, check: AcceptFn) -> Self {
        match self {
            Self::Regex { re, target, .. } => Self::Regex {
                re,
                target,
                accept: Some(check),
            },
            tag @ Self::Tag { .. } => tag,
        }
    }

    /// Find the first match starting at or after byte offset `at`.
    pub(crate) fn find_at<'t>(&self, text: &'t str, at: usize) -> Option<Hit<'t>> {
        match self {
            Self::Regex { re, target, accept } => find_regex(text, at, re, *target, *accept),
            Self::Tag { opener } => find_tag(text, at, opener),
        }
    }
}

fn find_regex<'t>(
    text: &'t str,
    mut at: usize,
    re: &Regex,
    target: usize,
    accept: Option<AcceptFn>,
) -> Option<Hit<'t>> {
    while at <= text.len() {
        let caps = re.captures_at(text, at)?;
        let whole = caps.get(0)?;
        if accept.is_none_or(|check| check(text, &caps)) {
            let replaced = caps.get(target).map_or(whole.range(), |m| m.range());
            return Some(Hit {
                text,
                start: whole.start(),
                range: replaced,
                end: whole.end(),
                groups: caps
                    .iter()
                    .map(|group| group.map(|m| m.as_str()))
                    .collect(),
            });
        }
        at = next_char(text, whole.start());
    }
    None
}

fn find_tag<'t>(text: &'t str, mut at: usize, opener: &Regex) -> Option<Hit<'t>> {
    while at <= text.len() {
        let caps = opener.captures_at(text, at)?;
        let open = caps.get(0)?;
        let tag = caps.get(1)?.as_str();

        // at least one character of content before the closer
        let content_start = open.end();
        let search_from = next_char(text, content_start);
        if search_from <= text.len() {
            let closer = format!("[/{}]", tag.to_ascii_lowercase());
            if let Some(pos) = find_ignore_ascii_case(text, &closer, search_from) {
                let end = pos + closer.len();
                return Some(Hit {
                    text,
                    start: open.start(),
                    range: open.start()..end,
                    end,
                    groups: vec![
                        Some(&text[open.start()..end]),
                        Some(tag),
                        Some(&text[content_start..pos]),
                    ],
                });
            }
        }
        at = next_char(text, open.start());
    }
    None
}

/// Byte offset of `needle` (lowercase ASCII) in `haystack` at or after `from`,
/// comparing ASCII case-insensitively.
fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Offset of the character after the one starting at `pos`.
pub(crate) fn next_char(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(pos + 1, |c| pos + c.len_utf8())
}

/// One match inside a raw span.
#[derive(Debug)]
pub(crate) struct Hit<'t> {
    /// The raw span being scanned.
    pub text: &'t str,
    /// Start of the whole match, including context.
    pub start: usize,
    /// Bytes replaced by the rendered output.
    pub range: Range<usize>,
    /// End of the whole match; scanning resumes here.
    pub end: usize,
    /// Capture groups, group 0 being the whole match.
    pub groups: Vec<Option<&'t str>>,
}

impl<'t> Hit<'t> {
    /// Capture group `i`, empty when it did not participate.
    pub(crate) fn group(&self, i: usize) -> &'t str {
        self.groups.get(i).copied().flatten().unwrap_or("")
    }

    /// Whether the replaced text starts a line of its span.
    pub(crate) fn at_line_start(&self) -> bool {
        self.range.start == 0 || self.text[..self.range.start].ends_with('\n')
    }
}

/// What a match is replaced with.
#[derive(Debug, PartialEq)]
pub(crate) enum Replacement {
    /// Final nodes, never scanned again.
    Nodes(Vec<Node>),
    /// Literal text that stays raw for later passes.
    Text(String),
}

/// State shared by the renderers of one formatting call.
pub(crate) struct PassContext<'a> {
    pub formatter: &'a Formatter,
    pub keywords: &'a [String],
    /// Nesting depth of this call (0 for the outermost).
    pub depth: usize,
}

impl PassContext<'_> {
    /// Format captured inner text with the whole pipeline, one level deeper.
    pub(crate) fn format_nested(&self, inner: &str) -> Vec<Node> {
        self.formatter
            .format_at_depth(inner, self.keywords, self.depth + 1)
    }
}

/// One rewrite step.
pub(crate) struct Pass {
    /// Name used in keys and debug logs.
    pub label: &'static str,
    pub matcher: Matcher,
    pub render: RenderFn,
    /// Skip candidates that overlap a caller keyword title.
    pub title_guarded: bool,
    /// Recursive pass, disabled once the depth limit is reached.
    pub recursive: bool,
}

impl Pass {
    pub(crate) fn new(label: &'static str, matcher: Matcher, render: RenderFn) -> Self {
        Self {
            label,
            matcher,
            render,
            title_guarded: false,
            recursive: false,
        }
    }

    pub(crate) fn title_guarded(mut self) -> Self {
        self.title_guarded = true;
        self
    }

    pub(crate) fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }
}
