//! Output node types produced by the formatter.

use std::fmt;

/// Horizontal alignment of an aligned block (`[l]`, `[c]`, `[r]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// Resolve an alignment tag (`l`, `left`, `c`, `center`, `r`, `right`).
    ///
    /// Matching is case-insensitive; anything unrecognized centers.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "l" | "left" => Self::Left,
            "r" | "right" => Self::Right,
            _ => Self::Center,
        }
    }

    /// CSS `text-align` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Resolved presentation of an inline icon.
///
/// Lengths are CSS lengths kept exactly as authored (`0.2em`, `-1px`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IconStyle {
    /// Multiplicative scale applied to the icon.
    pub scale: f64,
    pub pad_top: Option<String>,
    pub pad_bottom: Option<String>,
    /// Vertical offset (`translateY`).
    pub shift_y: Option<String>,
    pub margin_left: String,
    pub margin_right: String,
    /// Indent width when the icon leads its line and the text wraps around it.
    pub lead: Option<String>,
}

/// An inline icon with both of its interchangeable asset references.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Icon {
    /// Registry name (lowercase).
    pub name: String,
    /// Alternative text, the name as the author typed it.
    pub alt: String,
    /// Vector asset for on-screen display.
    pub vector: String,
    /// Raster asset substituted at export time.
    pub raster: String,
    pub style: IconStyle,
}

/// A formatted inline node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "snake_case"))]
pub enum Node {
    /// Plain text.
    Text(String),
    Icon(Icon),
    Bold(Vec<Node>),
    Italic(Vec<Node>),
    Underline(Vec<Node>),
    /// Full-width block with a text alignment.
    Aligned { align: Align, children: Vec<Node> },
    /// Bold numeral. Numerals are never emitted as `Bold`; a consumer
    /// looking for bold text must treat this variant as bold too.
    ///
    /// ```
    /// use spirit_format::{Align, Node, format_text};
    ///
    /// let nodes = format_text("[r]Val: *2*[/r]", &[] as &[&str]);
    /// let Node::Aligned { align: Align::Right, children } = &nodes[0] else {
    ///     panic!("expected an aligned block");
    /// };
    /// assert!(children.contains(&Node::Number("2".to_owned())));
    /// assert!(!children.iter().any(|n| matches!(n, Node::Bold(_))));
    /// ```
    Number(String),
    /// Children that must not be split across lines.
    NoBreak(Vec<Node>),
    /// Bullet glyph followed by a non-breaking space.
    Bullet,
    /// Horizontal rule.
    Rule,
    LineBreak,
    /// Highlighted caller-supplied keyword title.
    Keyword(String),
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Concatenated text content, with breaks as newlines and icons as
    /// `:name:` shortcodes.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Self::Text(s) | Self::Number(s) | Self::Keyword(s) => out.push_str(s),
            Self::Icon(icon) => {
                out.push(':');
                out.push_str(&icon.name);
                out.push(':');
            }
            Self::Bold(children)
            | Self::Italic(children)
            | Self::Underline(children)
            | Self::NoBreak(children)
            | Self::Aligned { children, .. } => {
                for child in children {
                    child.write_plain(out);
                }
            }
            Self::Bullet => out.push_str("\u{2022}\u{00A0}"),
            Self::Rule => out.push_str("---"),
            Self::LineBreak => out.push('\n'),
        }
    }
}

/// Plain text of a node sequence.
#[must_use]
pub fn plain_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::plain_text).collect()
}

/// Reconciliation key for a produced fragment: pass label plus a sequence
/// number unique within one formatting call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    pub pass: &'static str,
    pub seq: u32,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.pass, self.seq)
    }
}

/// A group of nodes produced by one rewrite, with its key.
///
/// Plain text left over at the end of the pipeline has no key.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub key: Option<Key>,
    pub nodes: Vec<Node>,
}
