//! Inline rich-text formatting for spirit cards.
//!
//! Turns authored card text into a sequence of styled inline [`Node`]s:
//!
//! - `[l]`/`[c]`/`[r]` alignment and `[u]` underline blocks (formatted recursively)
//! - `---` rules and `- ` bullets
//! - `:name:` / `:name{lg, indent, mr=0.2em}:` icon shortcodes (`\:` escapes)
//! - spirit glyphs (`¤ § ◊ ◆ ◇`), signed modifiers and numerals in bold
//! - `*bold*` and `_italic_`
//! - game terms (`Good Hit`, `Finesse`, `Striking Range`, ...) and caller
//!   keyword titles
//!
//! # Architecture
//!
//! Formatting is a fixed sequence of rewrite passes over a list of segments.
//! A segment is either raw text or a finished fragment of nodes; each pass
//! only scans raw text, so markup claimed by an earlier pass is never
//! reinterpreted by a later one. Leftover text is finally split into text
//! nodes and line breaks.
//!
//! [`HtmlRenderer`] turns nodes into inline HTML, with either vector or
//! raster icon assets.
//!
//! # Example
//!
//! ```
//! use spirit_format::{Formatter, Node};
//!
//! let formatter = Formatter::new();
//! let nodes = formatter.format("- Use *Guard*", &["Guard"]);
//! assert_eq!(nodes[0], Node::Bullet);
//! ```

mod formatter;
mod html;
mod icons;
mod node;
pub mod options;
mod pass;
mod pipeline;

pub use formatter::{DEFAULT_MAX_DEPTH, Formatter, FormatterConfig, format_text};
pub use html::{AssetMode, HtmlRenderer, escape_html};
pub use icons::{DEFAULT_ICON_BASE, IconAsset, IconRegistry, SPIRIT_ICON, is_valid_icon_name};
pub use node::{Align, Fragment, Icon, IconStyle, Key, Node, plain_text};
