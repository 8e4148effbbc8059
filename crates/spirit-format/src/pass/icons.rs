//! Icon shortcodes and spirit glyphs.

use regex::Captures;

use super::{Hit, Matcher, Pass, PassContext, Replacement};
use crate::icons::{IconAsset, SPIRIT_ICON};
use crate::node::{Icon, IconStyle, Node};
use crate::options::{ShortcodeOptions, glyph_style};

/// `:name:` and `:name{options}:`; `\:name:` is an escape.
pub(crate) fn shortcodes() -> Pass {
    Pass::new(
        "emoji-shortcodes",
        Matcher::regex(r":([a-zA-Z][a-zA-Z0-9_-]{1,32})(?:\{([^}]+)\})?:")
            .accepting(not_escaped),
        render_shortcode,
    )
}

fn not_escaped(text: &str, caps: &Captures<'_>) -> bool {
    caps.get(0)
        .is_some_and(|m| !text[..m.start()].ends_with('\\'))
}

fn render_shortcode(hit: &Hit<'_>, cx: &PassContext<'_>) -> Replacement {
    let name = hit.group(1);
    let Some(asset) = cx.formatter.icons().lookup(name) else {
        // unknown icons stay literal, options included
        return Replacement::Text(hit.group(0).to_owned());
    };
    let options = ShortcodeOptions::parse(hit.group(2).trim());
    let style = options.icon_style(hit.at_line_start());
    Replacement::Nodes(vec![icon_node(asset, name, style)])
}

/// `+2¤`, `-1 ◆`: a signed modifier glued to its spirit glyph.
pub(crate) fn spirit_modifier() -> Pass {
    Pass::new(
        "spirit-modifier",
        Matcher::regex(r"([+\-]\s*[0-9]+)\s*[¤§◊◆◇]"),
        render_spirit_modifier,
    )
}

fn render_spirit_modifier(hit: &Hit<'_>, cx: &PassContext<'_>) -> Replacement {
    let Some(spirit) = spirit_icon(cx) else {
        return Replacement::Text(hit.group(0).to_owned());
    };
    let number: String = hit.group(1).split_whitespace().collect();
    Replacement::Nodes(vec![Node::NoBreak(vec![Node::Number(number), spirit])])
}

/// Any remaining spirit glyph.
pub(crate) fn spirit_glyph() -> Pass {
    Pass::new("spirit-glyph", Matcher::regex(r"[¤§◊◆◇]"), render_spirit_glyph)
}

fn render_spirit_glyph(hit: &Hit<'_>, cx: &PassContext<'_>) -> Replacement {
    match spirit_icon(cx) {
        Some(icon) => Replacement::Nodes(vec![icon]),
        None => Replacement::Text(hit.group(0).to_owned()),
    }
}

fn spirit_icon(cx: &PassContext<'_>) -> Option<Node> {
    cx.formatter
        .icons()
        .lookup(SPIRIT_ICON)
        .map(|asset| icon_node(asset, SPIRIT_ICON, glyph_style()))
}

fn icon_node(asset: &IconAsset, alt: &str, style: IconStyle) -> Node {
    Node::Icon(Icon {
        name: asset.name.clone(),
        alt: alt.to_owned(),
        vector: asset.vector.clone(),
        raster: asset.raster.clone(),
        style,
    })
}
