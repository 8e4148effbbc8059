//! The formatter: runs the rewrite passes in their fixed order.

use std::sync::LazyLock;

use crate::icons::IconRegistry;
use crate::node::{Fragment, Node};
use crate::pass::{self, Pass, PassContext};
use crate::pipeline::Pipeline;

/// Default limit for nested `[align]` / `[u]` blocks.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// The static passes, in order. Caller keyword titles run after them.
///
/// Earlier passes win on overlapping syntax: the recursive tag blocks come
/// first so the outer text is never processed twice, and icons and numbers
/// are settled before emphasis and keywords can see them.
static PASSES: LazyLock<Vec<Pass>> = LazyLock::new(|| {
    let mut passes = vec![
        pass::align(),
        pass::underline(),
        pass::rule(),
        pass::shortcodes(),
        pass::bullets(),
        pass::spirit_modifier(),
        pass::spirit_glyph(),
        pass::signed_number(),
        pass::any_number(),
        pass::bold(),
        pass::italic(),
    ];
    passes.extend(pass::fixed_keywords());
    passes
});

/// Formatter configuration.
#[derive(Clone, Debug)]
pub struct FormatterConfig {
    /// Log every pass with `tracing::debug!`.
    pub debug: bool,
    /// Deepest nesting of recursive blocks; deeper tags stay literal.
    pub max_depth: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Turns authored card text into styled inline nodes.
///
/// # Example
///
/// ```
/// use spirit_format::{Formatter, Node};
///
/// let formatter = Formatter::default();
/// let nodes = formatter.format("Deal 2 damage", &["Cleave"]);
/// assert_eq!(
///     nodes,
///     vec![
///         Node::text("Deal "),
///         Node::Number("2".to_owned()),
///         Node::text(" damage"),
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Formatter {
    icons: IconRegistry,
    config: FormatterConfig,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// Formatter with the built-in icons and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_icons(IconRegistry::builtin())
    }

    /// Formatter with a custom icon registry.
    #[must_use]
    pub fn with_icons(icons: IconRegistry) -> Self {
        Self {
            icons,
            config: FormatterConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self
    }

    /// Turn per-pass debug logging on or off.
    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.config.debug = enabled;
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    /// Format `text`, highlighting any of the `keywords` titles.
    pub fn format<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> Vec<Node> {
        self.format_fragments(text, keywords)
            .into_iter()
            .flat_map(|fragment| fragment.nodes)
            .collect()
    }

    /// Like [`format`](Self::format), keeping each rewrite's key.
    pub fn format_fragments<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> Vec<Fragment> {
        let titles = pass::titles(keywords);
        self.run(text, &titles, 0)
    }

    pub(crate) fn format_at_depth(&self, text: &str, titles: &[String], depth: usize) -> Vec<Node> {
        self.run(text, titles, depth)
            .into_iter()
            .flat_map(|fragment| fragment.nodes)
            .collect()
    }

    fn run(&self, text: &str, titles: &[String], depth: usize) -> Vec<Fragment> {
        let mut pipeline = Pipeline::new(text);
        let cx = PassContext {
            formatter: self,
            keywords: titles,
            depth,
        };
        let title_pattern = pass::title_pattern(titles);
        let at_depth_limit = depth >= self.config.max_depth;

        for step in PASSES.iter() {
            if step.recursive && at_depth_limit {
                if pipeline.has_match(step) {
                    tracing::warn!(
                        pass = step.label,
                        depth,
                        "Nesting limit reached, leaving tags as text"
                    );
                }
                continue;
            }
            let matches = pipeline.apply(step, &cx, title_pattern.as_ref());
            self.trace(step.label, matches, &pipeline);
        }

        if let Some(pattern) = title_pattern {
            let titles_pass = pass::title_keywords(pattern);
            let matches = pipeline.apply(&titles_pass, &cx, None);
            self.trace(titles_pass.label, matches, &pipeline);
        }

        pipeline.unescape_colons();
        pipeline.finish()
    }

    fn trace(&self, label: &str, matches: usize, pipeline: &Pipeline) {
        if self.config.debug {
            tracing::debug!(pass = label, matches, sample = ?pipeline.sample(), "Applied format pass");
        }
    }
}

/// Format with a default [`Formatter`].
pub fn format_text<S: AsRef<str>>(text: &str, keywords: &[S]) -> Vec<Node> {
    static DEFAULT: LazyLock<Formatter> = LazyLock::new(Formatter::new);
    DEFAULT.format(text, keywords)
}
