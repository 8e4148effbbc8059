//! End-to-end formatting behavior.

use pretty_assertions::assert_eq;
use spirit_format::{
    Align, Formatter, FormatterConfig, Icon, IconRegistry, IconStyle, Key, Node, format_text,
};

const NO_KEYWORDS: &[&str] = &[];

fn fmt(text: &str) -> Vec<Node> {
    format_text(text, NO_KEYWORDS)
}

fn text(s: &str) -> Node {
    Node::text(s)
}

fn number(s: &str) -> Node {
    Node::Number(s.to_owned())
}

fn bold_term(s: &str) -> Node {
    Node::NoBreak(vec![Node::Bold(vec![text(s)])])
}

fn style(scale: f64, margin: &str) -> IconStyle {
    IconStyle {
        scale,
        pad_top: None,
        pad_bottom: None,
        shift_y: None,
        margin_left: margin.to_owned(),
        margin_right: margin.to_owned(),
        lead: None,
    }
}

fn icon(name: &str, alt: &str, style: IconStyle) -> Node {
    Node::Icon(Icon {
        name: name.to_owned(),
        alt: alt.to_owned(),
        vector: format!("/card-assets/icons/{name}.svg"),
        raster: format!("/card-assets/icons/{name}.png"),
        style,
    })
}

fn spirit() -> Node {
    icon("spirit", "spirit", style(1.2, "-0.04em"))
}

#[test]
fn test_empty_input() {
    assert!(fmt("").is_empty());
}

#[test]
fn test_plain_text() {
    assert_eq!(fmt("just words"), vec![text("just words")]);
}

#[test]
fn test_escaped_shortcode_is_literal() {
    assert_eq!(fmt(r"\:sword:"), vec![text(":sword:")]);
}

#[test]
fn test_escaped_shortcode_before_number() {
    assert_eq!(fmt(r"\:fire: 2"), vec![text(":fire: "), number("2")]);
}

#[test]
fn test_modifier_with_glyph() {
    assert_eq!(
        fmt("-3¤"),
        vec![Node::NoBreak(vec![number("-3"), spirit()])]
    );
}

#[test]
fn test_modifier_with_spaces() {
    assert_eq!(
        fmt("Pay + 2 ◆ now"),
        vec![
            text("Pay "),
            Node::NoBreak(vec![number("+2"), spirit()]),
            text(" now"),
        ]
    );
}

#[test]
fn test_bare_glyph() {
    assert_eq!(fmt("§"), vec![spirit()]);
}

#[test]
fn test_keyword_title_inside_fixed_terms() {
    assert_eq!(
        format_text("Use Hack & Slash now", &["Hack & Slash"]),
        vec![
            bold_term("Use"),
            text(" "),
            Node::Keyword("Hack & Slash".to_owned()),
            text(" now"),
        ]
    );
}

#[test]
fn test_keyword_titles_match_whole_words() {
    assert_eq!(
        format_text("Guard or Guardian", &[" Guard ", ""]),
        vec![Node::Keyword("Guard".to_owned()), text(" or Guardian")]
    );
}

#[test]
fn test_keyword_title_with_number() {
    assert_eq!(
        format_text("Strike 2 twice", &["Strike 2"]),
        vec![Node::Keyword("Strike 2".to_owned()), text(" twice")]
    );
}

#[test]
fn test_bullets() {
    assert_eq!(
        fmt("- first\n- second"),
        vec![
            Node::Bullet,
            text("first"),
            Node::LineBreak,
            Node::Bullet,
            text("second"),
        ]
    );
}

#[test]
fn test_bullet_at_start_has_no_break() {
    assert_eq!(fmt("\n\n- x"), vec![Node::Bullet, text("x")]);
}

#[test]
fn test_bullet_after_blank_line_has_one_break() {
    assert_eq!(
        fmt("a\n\n- x"),
        vec![text("a"), Node::LineBreak, Node::Bullet, text("x")]
    );
    assert_eq!(
        fmt("a\r\n- x"),
        vec![text("a"), Node::LineBreak, Node::Bullet, text("x")]
    );
}

#[test]
fn test_indented_bullet_with_keyword() {
    assert_eq!(fmt("  - Hit"), vec![Node::Bullet, bold_term("Hit")]);
}

#[test]
fn test_hyphen_mid_line_is_not_a_bullet() {
    assert_eq!(fmt("a - b"), vec![text("a - b")]);
}

#[test]
fn test_rule_consumes_its_line() {
    assert_eq!(
        fmt("a\n---\nb"),
        vec![
            text("a"),
            Node::LineBreak,
            Node::Rule,
            Node::LineBreak,
            text("b"),
        ]
    );
}

#[test]
fn test_rule_at_edges() {
    assert_eq!(fmt("  -----  "), vec![Node::Rule]);
    assert_eq!(fmt("---\n- x"), vec![Node::Rule, Node::LineBreak, Node::Bullet, text("x")]);
}

#[test]
fn test_alignment_formats_recursively() {
    assert_eq!(
        fmt("[r]Val: *2*[/r]"),
        vec![Node::Aligned {
            align: Align::Right,
            children: vec![text("Val: *"), number("2"), text("*")],
        }]
    );
}

#[test]
fn test_alignment_with_emphasis() {
    assert_eq!(
        fmt("[CENTER]*Guard* up[/center] after"),
        vec![
            Node::Aligned {
                align: Align::Center,
                children: vec![Node::Bold(vec![text("Guard")]), text(" up")],
            },
            text(" after"),
        ]
    );
}

#[test]
fn test_nested_blocks() {
    assert_eq!(
        fmt("[c][u]x[/u][/c]"),
        vec![Node::Aligned {
            align: Align::Center,
            children: vec![Node::Underline(vec![text("x")])],
        }]
    );
}

#[test]
fn test_nesting_limit_leaves_tags_literal() {
    let formatter = Formatter::new().with_config(FormatterConfig {
        debug: false,
        max_depth: 1,
    });
    assert_eq!(
        formatter.format("[c][u]x[/u][/c]", NO_KEYWORDS),
        vec![Node::Aligned {
            align: Align::Center,
            children: vec![text("[u]x[/u]")],
        }]
    );
}

#[test]
fn test_nested_blocks_see_keyword_titles() {
    assert_eq!(
        format_text("[u]Target[/u]", &["Target"]),
        vec![Node::Underline(vec![Node::Keyword("Target".to_owned())])]
    );
    assert_eq!(
        fmt("[u]Target[/u]"),
        vec![Node::Underline(vec![bold_term("Target")])]
    );
}

#[test]
fn test_unmatched_tags_stay_literal() {
    assert_eq!(fmt("[u]x[/underline]"), vec![text("[u]x[/underline]")]);
    assert_eq!(fmt("[l] never closed"), vec![text("[l] never closed")]);
}

#[test]
fn test_unknown_icon_is_literal() {
    assert_eq!(fmt(":unknownthing:"), vec![text(":unknownthing:")]);
    assert_eq!(fmt(":unknown{2x}:"), vec![text(":unknown{2x}:")]);
}

#[test]
fn test_percentage_is_not_bold() {
    assert_eq!(fmt("50%"), vec![text("50%")]);
    assert_eq!(fmt("Roll 50% or 3"), vec![text("Roll 50% or "), number("3")]);
}

#[test]
fn test_numbers() {
    assert_eq!(
        fmt("Gain +2 and -1"),
        vec![
            text("Gain "),
            number("+2"),
            text(" and "),
            number("-1"),
        ]
    );
    assert_eq!(
        fmt("costs 1.5 or 1,000"),
        vec![
            text("costs "),
            number("1.5"),
            text(" or "),
            number("1,000"),
        ]
    );
}

#[test]
fn test_numbers_glued_to_words() {
    assert_eq!(fmt("x2 and 3rd"), vec![text("x2 and 3rd")]);
}

#[test]
fn test_numeric_token_judged_whole() {
    assert_eq!(fmt("1.5x"), vec![text("1.5x")]);
    assert_eq!(fmt("1,000%"), vec![text("1,000%")]);
}

#[test]
fn test_shortcode_with_options() {
    let mut expected = style(1.25, "0.08em");
    expected.pad_top = Some("2px".to_owned());
    assert_eq!(
        fmt(":fire{lg, pt=2px}: flames"),
        vec![icon("fire", "fire", expected), text(" flames")]
    );
}

#[test]
fn test_shortcode_case_insensitive() {
    assert_eq!(
        fmt(":FIRE:"),
        vec![icon("fire", "FIRE", style(1.0, "0.08em"))]
    );
}

#[test]
fn test_consecutive_shortcodes() {
    let fire = icon("fire", "fire", style(1.0, "0.08em"));
    assert_eq!(fmt(":fire::fire:"), vec![fire.clone(), fire]);
}

#[test]
fn test_leading_icon_indent() {
    let mut lead = style(1.0, "0");
    lead.lead = Some("1em".to_owned());
    assert_eq!(
        fmt("x\n:shield{indent}: Block"),
        vec![
            text("x"),
            Node::LineBreak,
            icon("shield", "shield", lead),
            text(" Block"),
        ]
    );
}

#[test]
fn test_indent_mid_line_is_inline() {
    assert_eq!(
        fmt("x :shield{indent}:"),
        vec![text("x "), icon("shield", "shield", style(1.0, "0.08em"))]
    );
}

#[test]
fn test_outcome_terms() {
    assert_eq!(
        fmt("Good Hit: gain"),
        vec![bold_term("Good\u{a0}Hit:"), text(" gain")]
    );
    assert_eq!(
        fmt("On a Miss, RP"),
        vec![text("On a "), bold_term("Miss,"), text(" "), bold_term("RP")]
    );
}

#[test]
fn test_damage_terms() {
    assert_eq!(
        fmt("Suffer a Heavy Wound"),
        vec![text("Suffer a "), bold_term("Heavy Wound")]
    );
}

#[test]
fn test_range_terms_are_italic() {
    assert_eq!(
        fmt("Striking Range."),
        vec![Node::NoBreak(vec![Node::Italic(vec![text(
            "Striking\u{a0}Range."
        )])])]
    );
}

#[test]
fn test_dash_is_an_opportunity() {
    assert_eq!(fmt("Dash"), vec![bold_term("Dash")]);
}

#[test]
fn test_terms_are_case_sensitive() {
    assert_eq!(fmt("a hit and a miss"), vec![text("a hit and a miss")]);
}

#[test]
fn test_term_after_accented_letter() {
    assert_eq!(fmt("éHit"), vec![text("é"), bold_term("Hit")]);
    assert_eq!(
        format_text("éGuard", &["Guard"]),
        vec![text("é"), Node::Keyword("Guard".to_owned())]
    );
}

#[test]
fn test_emphasis() {
    assert_eq!(
        fmt("*bold* and _it_"),
        vec![
            Node::Bold(vec![text("bold")]),
            text(" and "),
            Node::Italic(vec![text("it")]),
        ]
    );
}

#[test]
fn test_emphasis_stays_on_one_line() {
    assert_eq!(
        fmt("*a\nb*"),
        vec![text("*a"), Node::LineBreak, text("b*")]
    );
}

#[test]
fn test_line_breaks() {
    assert_eq!(
        fmt("a\r\n\nb"),
        vec![text("a"), Node::LineBreak, Node::LineBreak, text("b")]
    );
}

#[test]
fn test_unknown_icon_with_custom_registry() {
    let formatter = Formatter::with_icons(IconRegistry::empty());
    assert_eq!(formatter.format(":fire:", NO_KEYWORDS), vec![text(":fire:")]);
}

#[test]
fn test_fragment_keys_increase() {
    let fragments = Formatter::new().format_fragments("- a *b*", NO_KEYWORDS);
    let keys: Vec<Option<Key>> = fragments.iter().map(|f| f.key).collect();
    assert_eq!(
        keys,
        vec![
            Some(Key {
                pass: "bullets",
                seq: 0
            }),
            None,
            Some(Key {
                pass: "md-bold",
                seq: 1
            }),
        ]
    );
}

#[test]
fn test_debug_logging_does_not_change_output() {
    let mut formatter = Formatter::new();
    let quiet = formatter.format("- Hit for 2¤", &["Hit"]);
    formatter.set_debug_logging(true);
    assert!(formatter.config().debug);
    assert_eq!(formatter.format("- Hit for 2¤", &["Hit"]), quiet);
}
