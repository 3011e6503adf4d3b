//! Chat markup to HTML.
//!
//! This crate turns the small markup subset used in chat messages into HTML
//! by running an ordered list of regex substitution rules over the text:
//!
//! | Token | Output |
//! |---|---|
//! | `` ```…``` `` | `<pre><code>…</code></pre>` |
//! | `***…***` | `<b><i>…</i></b>` |
//! | `**…**` | `<b>…</b>` |
//! | `_…_` | `<i>…</i>` |
//! | lines of `\|cell\|cell\|` | `<table>`, first row as header |
//!
//! Rules run once each, in that order, over the whole string. A rule does not
//! skip text produced by an earlier one, and markup that never closes is left
//! untouched. The transform cannot fail.
//!
//! The table rule belongs to [`Dialect::Extended`] only; [`Dialect::Basic`]
//! stops after underscore italics.
//!
//! # Example
//!
//! ```
//! use chatmark_markup::transform;
//!
//! assert_eq!(transform("**Hi**, I am _here_."), "<b>Hi</b>, I am <i>here</i>.");
//! ```

mod dialect;
mod error;
mod rule;
mod table;
mod transformer;

pub use dialect::Dialect;
pub use error::UnknownName;
pub use rule::{RuleInfo, RuleKind};
pub use transformer::{RuleMatches, TransformOutput, Transformer};

/// Render `input` with every rule of the default dialect.
///
/// Shorthand for `Transformer::default().transform(input)`.
pub fn transform(input: &str) -> String {
    Transformer::default().transform(input)
}
