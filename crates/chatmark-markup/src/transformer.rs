//! The rule pipeline.

use std::borrow::Cow;

use crate::dialect::Dialect;
use crate::rule::{RuleInfo, RuleKind};

/// Number of replacements one rule made during a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatches {
    /// The rule.
    pub rule: RuleKind,
    /// How many spans it replaced.
    pub count: usize,
}

/// Result of [`Transformer::transform_with_stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Rendered HTML.
    pub html: String,
    /// Per-rule replacement counts, in application order.
    pub matches: Vec<RuleMatches>,
}

impl TransformOutput {
    /// Total replacements across all rules.
    pub fn total_matches(&self) -> usize {
        self.matches.iter().map(|m| m.count).sum()
    }
}

/// Applies an ordered list of substitution rules to chat markup.
///
/// Each rule runs exactly once, over the output of the previous rule, and
/// replaces every non-overlapping match. Nothing produced by an earlier rule
/// is protected from later ones, so `**x**` inside a code fence still turns
/// bold. Unmatched or unterminated markup is left as literal text.
///
/// # Example
///
/// ```
/// use chatmark_markup::{Dialect, RuleKind, Transformer};
///
/// let transformer = Transformer::new(Dialect::Basic).without(RuleKind::Italic);
/// assert_eq!(transformer.transform("**hi** my_var_name"), "<b>hi</b> my_var_name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformer {
    dialect: Dialect,
    rules: Vec<RuleKind>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Transformer {
    /// Create a transformer running every rule of `dialect`.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            rules: dialect.rules().to_vec(),
        }
    }

    /// Switch off a single rule. Removing a rule the dialect lacks is a no-op.
    #[must_use]
    pub fn without(mut self, rule: RuleKind) -> Self {
        self.rules.retain(|r| *r != rule);
        self
    }

    /// The dialect this transformer was built from.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Active rules in application order.
    pub fn rules(&self) -> &[RuleKind] {
        &self.rules
    }

    /// Descriptors of the active rules in application order.
    pub fn rule_info(&self) -> Vec<RuleInfo> {
        self.rules.iter().map(|rule| rule.info()).collect()
    }

    /// Render `input` to HTML.
    pub fn transform(&self, input: &str) -> String {
        self.transform_with_stats(input).html
    }

    /// Render `input` to HTML and report how often each rule fired.
    pub fn transform_with_stats(&self, input: &str) -> TransformOutput {
        let mut html = input.to_owned();
        let mut matches = Vec::with_capacity(self.rules.len());

        for &rule in &self.rules {
            let (replaced, count) = rule.apply(&html);
            if let Cow::Owned(replaced) = replaced {
                html = replaced;
            }
            tracing::trace!(rule = %rule, count, "Applied markup rule");
            matches.push(RuleMatches { rule, count });
        }

        let output = TransformOutput { html, matches };
        tracing::debug!(
            dialect = %self.dialect,
            input_len = input.len(),
            output_len = output.html.len(),
            replacements = output.total_matches(),
            "Transformed markup"
        );
        output
    }
}
