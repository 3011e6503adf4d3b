//! Error types for name parsing.

/// Returned when a rule or dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{name}' (expected one of: {expected})")]
pub struct UnknownName {
    /// What was being parsed ("rule" or "dialect").
    pub kind: &'static str,
    /// The rejected input.
    pub name: String,
    /// Comma-separated list of accepted names.
    pub expected: String,
}

impl UnknownName {
    pub(crate) fn new<'a>(
        kind: &'static str,
        name: &str,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            expected: expected.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}
