//! HTML backend for formatted nodes.
//!
//! Produces inline HTML for card paragraphs. Every icon carries both of its
//! asset references, so an export step can swap vector images for raster
//! ones (or back) without touching the layout.

use std::fmt::Write;

use crate::node::{Icon, Node};

/// Which icon asset is placed in `src`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetMode {
    /// Vector images, for on-screen display.
    #[default]
    Vector,
    /// Raster images, for static export.
    Raster,
}

/// Renders nodes to inline HTML.
///
/// # Example
///
/// ```
/// use spirit_format::{AssetMode, HtmlRenderer, format_text};
///
/// let nodes = format_text("Gain +1¤", &["Gain"]);
/// let html = HtmlRenderer::new(AssetMode::Raster).render(&nodes);
/// assert!(html.contains(r#"<strong class="kwd nowrap" data-k="title">Gain</strong>"#));
/// assert!(html.contains(r#"src="/card-assets/icons/spirit.png""#));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer {
    mode: AssetMode,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(mode: AssetMode) -> Self {
        Self { mode }
    }

    /// Render a node sequence.
    #[must_use]
    pub fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        self.render_into(nodes, &mut out);
        out
    }

    /// Render a node sequence, appending to `out`.
    pub fn render_into(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            self.render_node(node, out);
        }
    }

    fn render_node(&self, node: &Node, out: &mut String) {
        match node {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Icon(icon) => self.render_icon(icon, out),
            Node::Bold(children) => self.wrap("<strong>", children, "</strong>", out),
            Node::Italic(children) => self.wrap("<em>", children, "</em>", out),
            Node::Underline(children) => self.wrap(
                r#"<span style="text-decoration: underline">"#,
                children,
                "</span>",
                out,
            ),
            Node::Aligned { align, children } => {
                let align = align.as_str();
                let open = format!(
                    r#"<span class="align align-{align}" style="display: inline-block; width: 100%; text-align: {align}">"#
                );
                self.wrap(&open, children, "</span>", out);
            }
            Node::Number(number) => {
                let _ = write!(out, r#"<strong class="num">{}</strong>"#, escape_html(number));
            }
            Node::NoBreak(children) => {
                self.wrap(r#"<span class="nowrap">"#, children, "</span>", out);
            }
            Node::Bullet => out.push_str("<span class=\"bullet-dot\">\u{2022}</span>&nbsp;"),
            Node::Rule => {
                out.push_str(r#"<span class="rule" role="separator" aria-hidden="true"></span>"#);
            }
            Node::LineBreak => out.push_str("<br>"),
            Node::Keyword(text) => {
                let _ = write!(
                    out,
                    r#"<strong class="kwd nowrap" data-k="title">{}</strong>"#,
                    escape_html(text)
                );
            }
        }
    }

    fn wrap(&self, open: &str, children: &[Node], close: &str, out: &mut String) {
        out.push_str(open);
        self.render_into(children, out);
        out.push_str(close);
    }

    fn render_icon(&self, icon: &Icon, out: &mut String) {
        let style = &icon.style;

        let mut css = format!(
            "display: inline-block; line-height: 0; vertical-align: -0.15em; margin: 0 {} 0 {}",
            style.margin_right, style.margin_left
        );
        if let Some(top) = &style.pad_top {
            let _ = write!(css, "; padding-top: {top}");
        }
        if let Some(bottom) = &style.pad_bottom {
            let _ = write!(css, "; padding-bottom: {bottom}");
        }
        let mut transforms = Vec::new();
        if (style.scale - 1.0).abs() > f64::EPSILON {
            transforms.push(format!("scale({})", style.scale));
        }
        if let Some(shift) = &style.shift_y {
            transforms.push(format!("translateY({shift})"));
        }
        if !transforms.is_empty() {
            let _ = write!(css, "; transform: {}", transforms.join(" "));
        }
        css.push_str("; transform-origin: center");

        let (src, swap_attr, swap) = match self.mode {
            AssetMode::Vector => (&icon.vector, "data-png", &icon.raster),
            AssetMode::Raster => (&icon.raster, "data-svg", &icon.vector),
        };
        let class = if style.lead.is_some() {
            "emoji-wrap no-gap"
        } else {
            "emoji-wrap"
        };
        let img = format!(
            r#"<span class="{class}" style="{}"><img class="inline-ico emoji export-swap" src="{}" {swap_attr}="{}" alt="{}"></span>"#,
            escape_html(&css),
            escape_html(src),
            escape_html(swap),
            escape_html(&icon.alt),
        );

        match &style.lead {
            Some(indent) => {
                let _ = write!(
                    out,
                    r#"<span class="emoji-lead" style="--indent: {}">{img}</span>"#,
                    escape_html(indent)
                );
            }
            None => out.push_str(&img),
        }
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Align, IconStyle};
    use pretty_assertions::assert_eq;

    fn icon(lead: Option<&str>) -> Icon {
        Icon {
            name: "fire".to_owned(),
            alt: "Fire".to_owned(),
            vector: "/i/fire.svg".to_owned(),
            raster: "/i/fire.png".to_owned(),
            style: IconStyle {
                scale: 1.0,
                pad_top: None,
                pad_bottom: None,
                shift_y: None,
                margin_left: "0.08em".to_owned(),
                margin_right: "0.08em".to_owned(),
                lead: lead.map(str::to_owned),
            },
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let html = HtmlRenderer::default().render(&[Node::text("a < b & \"c\"")]);
        assert_eq!(html, "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_structural_nodes() {
        let nodes = vec![
            Node::Bullet,
            Node::NoBreak(vec![Node::Bold(vec![Node::text("Hit")])]),
            Node::LineBreak,
            Node::Rule,
        ];
        assert_eq!(
            HtmlRenderer::default().render(&nodes),
            "<span class=\"bullet-dot\">\u{2022}</span>&nbsp;<span class=\"nowrap\"><strong>Hit</strong></span><br><span class=\"rule\" role=\"separator\" aria-hidden=\"true\"></span>"
        );
    }

    #[test]
    fn test_aligned_block() {
        let nodes = vec![Node::Aligned {
            align: Align::Right,
            children: vec![Node::Number("2".to_owned())],
        }];
        assert_eq!(
            HtmlRenderer::default().render(&nodes),
            r#"<span class="align align-right" style="display: inline-block; width: 100%; text-align: right"><strong class="num">2</strong></span>"#
        );
    }

    #[test]
    fn test_icon_vector_mode() {
        let html = HtmlRenderer::new(AssetMode::Vector).render(&[Node::Icon(icon(None))]);
        assert_eq!(
            html,
            r#"<span class="emoji-wrap" style="display: inline-block; line-height: 0; vertical-align: -0.15em; margin: 0 0.08em 0 0.08em; transform-origin: center"><img class="inline-ico emoji export-swap" src="/i/fire.svg" data-png="/i/fire.png" alt="Fire"></span>"#
        );
    }

    #[test]
    fn test_icon_modes_share_layout() {
        let nodes = [Node::Icon(icon(None))];
        let vector = HtmlRenderer::new(AssetMode::Vector).render(&nodes);
        let raster = HtmlRenderer::new(AssetMode::Raster).render(&nodes);
        assert!(raster.contains(r#"src="/i/fire.png" data-svg="/i/fire.svg""#));
        assert_eq!(
            vector.split("<img").next(),
            raster.split("<img").next()
        );
    }

    #[test]
    fn test_icon_transforms() {
        let mut icon = icon(None);
        icon.style.scale = 1.5;
        icon.style.shift_y = Some("-1px".to_owned());
        icon.style.pad_top = Some("2px".to_owned());
        let html = HtmlRenderer::default().render(&[Node::Icon(icon)]);
        assert!(html.contains("; padding-top: 2px; transform: scale(1.5) translateY(-1px)"));
    }

    #[test]
    fn test_leading_icon() {
        let html = HtmlRenderer::default().render(&[Node::Icon(icon(Some("1em")))]);
        assert!(html.starts_with(r#"<span class="emoji-lead" style="--indent: 1em"><span class="emoji-wrap no-gap""#));
        assert!(html.ends_with("</span></span>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#x27;x&#x27;&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
