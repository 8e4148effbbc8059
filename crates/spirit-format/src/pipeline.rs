//! Segment pipeline: the working state of one formatting call.

use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use crate::node::{Fragment, Key, Node};
use crate::pass::{Pass, PassContext, Replacement, next_char};

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// One element of the pipeline's working sequence.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Segment {
    /// Text no pass has claimed yet.
    Raw(String),
    /// Output of an earlier pass; never scanned again.
    Styled(Fragment),
}

/// Ordered segments plus the key counter of one call.
#[derive(Debug)]
pub(crate) struct Pipeline {
    segments: Vec<Segment>,
    next_key: u32,
}

impl Pipeline {
    /// Seed the pipeline with the whole input as one raw span.
    pub(crate) fn new(input: &str) -> Self {
        let segments = if input.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Raw(input.to_owned())]
        };
        Self {
            segments,
            next_key: 0,
        }
    }

    fn key(&mut self, pass: &'static str) -> Key {
        let key = Key {
            pass,
            seq: self.next_key,
        };
        self.next_key += 1;
        key
    }

    /// Run one pass over every raw span. Returns the number of matches.
    ///
    /// `protect` marks spans of text that guarded passes must not touch.
    pub(crate) fn apply(
        &mut self,
        pass: &Pass,
        cx: &PassContext<'_>,
        protect: Option<&Regex>,
    ) -> usize {
        let mut matches = 0;
        let mut out = Vec::with_capacity(self.segments.len());

        for segment in mem::take(&mut self.segments) {
            let text = match segment {
                Segment::Raw(text) => text,
                styled @ Segment::Styled(_) => {
                    out.push(styled);
                    continue;
                }
            };

            let protected: Vec<_> = match protect {
                Some(re) if pass.title_guarded => re.find_iter(&text).map(|m| m.range()).collect(),
                _ => Vec::new(),
            };

            let mut last = 0;
            let mut at = 0;
            while let Some(hit) = pass.matcher.find_at(&text, at) {
                if protected
                    .iter()
                    .any(|p| p.start < hit.range.end && hit.range.start < p.end)
                {
                    at = next_char(&text, hit.start);
                    continue;
                }

                matches += 1;
                push_raw(&mut out, &text[last..hit.range.start]);
                match (pass.render)(&hit, cx) {
                    Replacement::Nodes(nodes) => {
                        let key = self.key(pass.label);
                        out.push(Segment::Styled(Fragment {
                            key: Some(key),
                            nodes,
                        }));
                    }
                    Replacement::Text(literal) => push_raw(&mut out, &literal),
                }
                last = hit.range.end;
                at = if hit.end > hit.start {
                    hit.end
                } else {
                    next_char(&text, hit.end)
                };
                if at > text.len() {
                    break;
                }
            }
            push_raw(&mut out, &text[last..]);
        }

        self.segments = out;
        matches
    }

    /// Whether the pass would match any raw span.
    pub(crate) fn has_match(&self, pass: &Pass) -> bool {
        self.segments.iter().any(|segment| match segment {
            Segment::Raw(text) => pass.matcher.find_at(text, 0).is_some(),
            Segment::Styled(_) => false,
        })
    }

    /// Replace `\:` with `:` in raw spans, undoing the shortcode escape.
    pub(crate) fn unescape_colons(&mut self) {
        for segment in &mut self.segments {
            if let Segment::Raw(text) = segment
                && text.contains("\\:")
            {
                *text = text.replace("\\:", ":");
            }
        }
    }

    /// Turn the remaining raw spans into text nodes and line breaks.
    pub(crate) fn finish(mut self) -> Vec<Fragment> {
        let mut fragments = Vec::with_capacity(self.segments.len());
        for segment in mem::take(&mut self.segments) {
            let text = match segment {
                Segment::Styled(fragment) => {
                    fragments.push(fragment);
                    continue;
                }
                Segment::Raw(text) => text,
            };
            for (i, part) in LINE_BREAK.split(&text).enumerate() {
                if i > 0 {
                    let key = self.key("lb");
                    fragments.push(Fragment {
                        key: Some(key),
                        nodes: vec![Node::LineBreak],
                    });
                }
                if !part.is_empty() {
                    fragments.push(Fragment {
                        key: None,
                        nodes: vec![Node::text(part)],
                    });
                }
            }
        }
        fragments
    }

    /// First few segments, for debug logging.
    pub(crate) fn sample(&self) -> &[Segment] {
        &self.segments[..self.segments.len().min(3)]
    }

    #[cfg(test)]
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Append raw text, merging with a preceding raw span.
fn push_raw(out: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Raw(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Segment::Raw(text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::Formatter;
    use crate::pass::Matcher;
    use pretty_assertions::assert_eq;

    fn star(_hit: &crate::pass::Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
        Replacement::Nodes(vec![Node::Rule])
    }

    fn literal(hit: &crate::pass::Hit<'_>, _cx: &PassContext<'_>) -> Replacement {
        Replacement::Text(hit.group(0).to_uppercase())
    }

    fn context(formatter: &Formatter) -> PassContext<'_> {
        PassContext {
            formatter,
            keywords: &[],
            depth: 0,
        }
    }

    #[test]
    fn test_apply_splits_raw_spans() {
        let formatter = Formatter::default();
        let cx = context(&formatter);
        let mut pipeline = Pipeline::new("a*b*c");
        let pass = Pass::new("star", Matcher::regex(r"\*"), star);

        assert_eq!(pipeline.apply(&pass, &cx, None), 2);
        assert_eq!(
            pipeline.segments(),
            &[
                Segment::Raw("a".to_owned()),
                Segment::Styled(Fragment {
                    key: Some(Key { pass: "star", seq: 0 }),
                    nodes: vec![Node::Rule],
                }),
                Segment::Raw("b".to_owned()),
                Segment::Styled(Fragment {
                    key: Some(Key { pass: "star", seq: 1 }),
                    nodes: vec![Node::Rule],
                }),
                Segment::Raw("c".to_owned()),
            ]
        );
    }

    #[test]
    fn test_styled_segments_are_not_rescanned() {
        let formatter = Formatter::default();
        let cx = context(&formatter);
        let mut pipeline = Pipeline::new("x*y");
        let first = Pass::new("star", Matcher::regex(r"\*"), star);
        let second = Pass::new("star", Matcher::regex(r"\*"), star);

        pipeline.apply(&first, &cx, None);
        assert_eq!(pipeline.apply(&second, &cx, None), 0);
    }

    #[test]
    fn test_text_replacement_merges_with_neighbours() {
        let formatter = Formatter::default();
        let cx = context(&formatter);
        let mut pipeline = Pipeline::new("a:b:c");
        let pass = Pass::new("upper", Matcher::regex(r":b:"), literal);

        assert_eq!(pipeline.apply(&pass, &cx, None), 1);
        assert_eq!(pipeline.segments(), &[Segment::Raw("a:B:c".to_owned())]);
    }

    #[test]
    fn test_guarded_pass_skips_protected_text() {
        let formatter = Formatter::default();
        let cx = context(&formatter);
        let mut pipeline = Pipeline::new("x x");
        let pass = Pass::new("star", Matcher::regex("x"), star).title_guarded();
        let protect = Regex::new(r"^x").unwrap();

        assert_eq!(pipeline.apply(&pass, &cx, Some(&protect)), 1);
        assert_eq!(pipeline.segments()[0], Segment::Raw("x ".to_owned()));
    }

    #[test]
    fn test_finish_splits_newlines() {
        let fragments = Pipeline::new("a\r\n\nb\n").finish();
        let nodes: Vec<_> = fragments.into_iter().flat_map(|f| f.nodes).collect();
        assert_eq!(
            nodes,
            vec![
                Node::text("a"),
                Node::LineBreak,
                Node::LineBreak,
                Node::text("b"),
                Node::LineBreak,
            ]
        );
    }

    #[test]
    fn test_unescape_colons() {
        let mut pipeline = Pipeline::new(r"a\:b");
        pipeline.unescape_colons();
        assert_eq!(pipeline.segments(), &[Segment::Raw("a:b".to_owned())]);
    }

    #[test]
    fn test_empty_input() {
        assert!(Pipeline::new("").finish().is_empty());
    }
}
