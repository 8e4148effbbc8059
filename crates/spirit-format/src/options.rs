//! Shortcode option grammar.
//!
//! Parses the `{...}` part of `:name{2x, indent, mr=0.2em}:` in two steps:
//! [`tokenize`] classifies each comma-separated token, then
//! [`ShortcodeOptions::from_tokens`] folds the tokens (later tokens win) and
//! [`ShortcodeOptions::icon_style`] applies defaults.

use crate::node::IconStyle;

/// Margin used by `hug`, `hugL` and `hugR`.
const HUG_MARGIN: &str = "-0.1em";

/// Default side margin of a shortcode icon without margin options.
const DEFAULT_MARGIN: &str = "0.08em";

/// Scale of spirit glyph icons.
const GLYPH_SCALE: f64 = 1.2;

/// Side margin of spirit glyph icons.
const GLYPH_MARGIN: &str = "-0.04em";

/// Named size buckets.
const NAMED_SCALES: &[(&str, f64)] = &[
    ("sm", 0.85),
    ("md", 1.0),
    ("lg", 1.25),
    ("xl", 1.5),
    ("xxl", 2.0),
];

/// One recognized option token.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionToken {
    /// `2x`, `150%` or a named bucket.
    Scale(f64),
    /// `indent` (no width) or `indent=<len>`.
    Indent(Option<String>),
    PadTop(String),
    PadBottom(String),
    /// `py=<len>`: both paddings.
    PadY(String),
    Shift(String),
    MarginX(String),
    MarginLeft(String),
    MarginRight(String),
    Hug,
    HugLeft,
    HugRight,
}

/// Split an option string into recognized tokens.
///
/// Unrecognized tokens are dropped.
///
/// # Example
///
/// ```
/// use spirit_format::options::{tokenize, OptionToken};
///
/// let tokens = tokenize("lg, pt = 2px, sparkle");
/// assert_eq!(
///     tokens,
///     vec![OptionToken::Scale(1.25), OptionToken::PadTop("2px".to_owned())]
/// );
/// ```
pub fn tokenize(raw: &str) -> Vec<OptionToken> {
    raw.split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .filter_map(classify)
        .collect()
}

fn classify(tok: &str) -> Option<OptionToken> {
    if let Some(n) = strip_suffix_ignore_case(tok, 'x').and_then(parse_decimal) {
        return Some(OptionToken::Scale(n));
    }
    if let Some(n) = tok.strip_suffix('%').and_then(parse_decimal) {
        return Some(OptionToken::Scale(n / 100.0));
    }

    let lower = tok.to_ascii_lowercase();
    if let Some(&(_, scale)) = NAMED_SCALES.iter().find(|(name, _)| *name == lower) {
        return Some(OptionToken::Scale(scale));
    }

    match lower.as_str() {
        "indent" => return Some(OptionToken::Indent(None)),
        "hug" => return Some(OptionToken::Hug),
        "hugl" => return Some(OptionToken::HugLeft),
        "hugr" => return Some(OptionToken::HugRight),
        _ => {}
    }

    let (key, value) = tok.split_once('=')?;
    let value = value.trim_start();
    if value.is_empty() {
        return None;
    }
    let value = value.to_owned();
    let token = match key.trim_end().to_ascii_lowercase().as_str() {
        "indent" => OptionToken::Indent(Some(value)),
        "pt" => OptionToken::PadTop(value),
        "pb" => OptionToken::PadBottom(value),
        "py" => OptionToken::PadY(value),
        "shift" => OptionToken::Shift(value),
        "mx" => OptionToken::MarginX(value),
        "ml" => OptionToken::MarginLeft(value),
        "mr" => OptionToken::MarginRight(value),
        _ => return None,
    };
    Some(token)
}

fn strip_suffix_ignore_case(s: &str, suffix: char) -> Option<&str> {
    s.strip_suffix(suffix)
        .or_else(|| s.strip_suffix(suffix.to_ascii_uppercase()))
}

/// Parse `digits[.digits]`; signs, exponents and bare dots are rejected.
fn parse_decimal(s: &str) -> Option<f64> {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int) || frac.is_some_and(|f| !all_digits(f)) {
        return None;
    }
    s.parse().ok()
}

/// Leading-icon request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Indent {
    /// Explicit indent width; defaults to the icon scale in `em`.
    pub width: Option<String>,
}

/// Parsed shortcode options.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortcodeOptions {
    pub scale: f64,
    pub pad_top: Option<String>,
    pub pad_bottom: Option<String>,
    pub shift_y: Option<String>,
    pub margin_x: Option<String>,
    pub margin_left: Option<String>,
    pub margin_right: Option<String>,
    pub indent: Option<Indent>,
}

impl Default for ShortcodeOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pad_top: None,
            pad_bottom: None,
            shift_y: None,
            margin_x: None,
            margin_left: None,
            margin_right: None,
            indent: None,
        }
    }
}

impl ShortcodeOptions {
    /// Parse an option string (without braces).
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(tokenize(raw))
    }

    /// Fold tokens in order; a later token overwrites what an earlier one set.
    pub fn from_tokens(tokens: impl IntoIterator<Item = OptionToken>) -> Self {
        let mut opts = Self::default();
        for token in tokens {
            match token {
                OptionToken::Scale(scale) => opts.scale = scale,
                OptionToken::Indent(None) => {
                    opts.indent.get_or_insert_with(Indent::default);
                }
                OptionToken::Indent(width) => opts.indent = Some(Indent { width }),
                OptionToken::PadTop(v) => opts.pad_top = Some(v),
                OptionToken::PadBottom(v) => opts.pad_bottom = Some(v),
                OptionToken::PadY(v) => {
                    opts.pad_top = Some(v.clone());
                    opts.pad_bottom = Some(v);
                }
                OptionToken::Shift(v) => opts.shift_y = Some(v),
                OptionToken::MarginX(v) => opts.margin_x = Some(v),
                OptionToken::MarginLeft(v) => opts.margin_left = Some(v),
                OptionToken::MarginRight(v) => opts.margin_right = Some(v),
                OptionToken::Hug => {
                    opts.margin_left = Some(HUG_MARGIN.to_owned());
                    opts.margin_right = Some(HUG_MARGIN.to_owned());
                }
                OptionToken::HugLeft => opts.margin_left = Some(HUG_MARGIN.to_owned()),
                OptionToken::HugRight => opts.margin_right = Some(HUG_MARGIN.to_owned()),
            }
        }
        opts
    }

    /// Indent width when the icon was asked to lead its line.
    pub fn indent_width(&self) -> Option<String> {
        self.indent.as_ref().map(|indent| {
            indent
                .width
                .clone()
                .unwrap_or_else(|| format!("{}em", self.scale))
        })
    }

    fn side(&self, side: Option<&String>) -> Option<String> {
        side.or(self.margin_x.as_ref()).cloned()
    }

    /// Resolve into the rendered icon style.
    ///
    /// The indent only applies when the shortcode starts a line.
    pub fn icon_style(&self, at_line_start: bool) -> IconStyle {
        let left = self.side(self.margin_left.as_ref());
        let right = self.side(self.margin_right.as_ref());

        let lead = if at_line_start { self.indent_width() } else { None };
        let (margin_left, margin_right) = if lead.is_some() {
            ("0".to_owned(), right.unwrap_or_else(|| "0".to_owned()))
        } else if left.is_some() || right.is_some() {
            (
                left.unwrap_or_else(|| "0".to_owned()),
                right.unwrap_or_else(|| "0".to_owned()),
            )
        } else {
            (DEFAULT_MARGIN.to_owned(), DEFAULT_MARGIN.to_owned())
        };

        IconStyle {
            scale: self.scale,
            pad_top: self.pad_top.clone(),
            pad_bottom: self.pad_bottom.clone(),
            shift_y: self.shift_y.clone(),
            margin_left,
            margin_right,
            lead,
        }
    }
}

/// Style of an icon produced from a spirit glyph.
pub(crate) fn glyph_style() -> IconStyle {
    IconStyle {
        scale: GLYPH_SCALE,
        pad_top: None,
        pad_bottom: None,
        shift_y: None,
        margin_left: GLYPH_MARGIN.to_owned(),
        margin_right: GLYPH_MARGIN.to_owned(),
        lead: None,
    }
}
