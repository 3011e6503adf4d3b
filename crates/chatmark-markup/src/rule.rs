//! Substitution rules and the patterns behind them.
//!
//! Each [`RuleKind`] owns one compiled pattern and one replacement. Rules
//! never look at each other's output specially: a rule simply runs over
//! whatever string the previous rule produced.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::UnknownName;
use crate::table;

/// Triple-backtick fence, body may span lines (shortest match).
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

// Inline spans stop at any line terminator: `\n`, `\r`, U+2028 and U+2029.
static BOLD_ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*\*").unwrap()
});

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").unwrap());

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^\n\r\x{2028}\x{2029}]*?)_").unwrap());

/// One or more consecutive lines that start and end with a pipe.
///
/// The newline ending the last row is part of the match so that
/// [`table::render`] can put it back after `</table>`.
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^[ \t]*\|[^\n]*\|[ \t\r]*(?:\n|$))+").unwrap()
});

/// A single substitution rule.
///
/// Variants are declared in application order; [`RuleKind::ALL`] and the
/// derived `Ord` both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RuleKind {
    /// `` ```…``` `` → `<pre><code>…</code></pre>`
    CodeFence,
    /// `***…***` → `<b><i>…</i></b>`
    BoldItalic,
    /// `**…**` → `<b>…</b>`
    Bold,
    /// `_…_` → `<i>…</i>`
    Italic,
    /// Lines of `|cell|cell|` → `<table>`, first row as header.
    Table,
}

impl RuleKind {
    /// Every rule, in application order.
    pub const ALL: [Self; 5] = [
        Self::CodeFence,
        Self::BoldItalic,
        Self::Bold,
        Self::Italic,
        Self::Table,
    ];

    /// Stable snake_case name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::CodeFence => "code_fence",
            Self::BoldItalic => "bold_italic",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Table => "table",
        }
    }

    /// Token pattern this rule recognizes, as shown to users.
    pub fn token(self) -> &'static str {
        match self {
            Self::CodeFence => "```…```",
            Self::BoldItalic => "***…***",
            Self::Bold => "**…**",
            Self::Italic => "_…_",
            Self::Table => "|cell|cell| (one or more lines)",
        }
    }

    /// Human-readable description of the produced HTML.
    pub fn output(self) -> &'static str {
        match self {
            Self::CodeFence => "preformatted code block",
            Self::BoldItalic => "bold + italic",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Table => "HTML table, first row = header",
        }
    }

    /// Descriptor bundling name, token and output for listings.
    pub fn info(self) -> RuleInfo {
        RuleInfo {
            name: self.name(),
            token: self.token(),
            output: self.output(),
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::CodeFence => &CODE_FENCE_RE,
            Self::BoldItalic => &BOLD_ITALIC_RE,
            Self::Bold => &BOLD_RE,
            Self::Italic => &ITALIC_RE,
            Self::Table => &TABLE_RE,
        }
    }

    fn render(self, caps: &Captures<'_>) -> String {
        match self {
            Self::CodeFence => format!("<pre><code>{}</code></pre>", &caps[1]),
            Self::BoldItalic => format!("<b><i>{}</i></b>", &caps[1]),
            Self::Bold => format!("<b>{}</b>", &caps[1]),
            Self::Italic => format!("<i>{}</i>", &caps[1]),
            Self::Table => table::render(&caps[0]),
        }
    }

    /// Replace every non-overlapping match in `text`.
    ///
    /// Returns the rewritten text (borrowed when nothing matched) and the
    /// number of replacements made.
    pub(crate) fn apply(self, text: &str) -> (Cow<'_, str>, usize) {
        let mut count = 0;
        let result = self.pattern().replace_all(text, |caps: &Captures<'_>| {
            count += 1;
            self.render(caps)
        });
        (result, count)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownName::new("rule", s, Self::ALL.map(Self::name)))
    }
}

/// Static description of a rule, as printed by rule listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuleInfo {
    /// Rule name (e.g. `bold_italic`).
    pub name: &'static str,
    /// Recognized token pattern.
    pub token: &'static str,
    /// Produced HTML.
    pub output: &'static str,
}
