//! Named revisions of the rule list.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownName;
use crate::rule::RuleKind;

const BASIC_RULES: &[RuleKind] = &[
    RuleKind::CodeFence,
    RuleKind::BoldItalic,
    RuleKind::Bold,
    RuleKind::Italic,
];

const EXTENDED_RULES: &[RuleKind] = &RuleKind::ALL;

/// Which revision of the markup rules is active.
///
/// Later dialects only ever add rules; the rules of [`Dialect::Basic`] are a
/// prefix of those of [`Dialect::Extended`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dialect {
    /// Code fences, bold-italic, bold and underscore italics.
    Basic,
    /// Everything in `Basic` plus pipe tables.
    #[default]
    Extended,
}

impl Dialect {
    /// Every dialect, oldest first.
    pub const ALL: [Self; 2] = [Self::Basic, Self::Extended];

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }

    /// Rules of this dialect in application order.
    pub fn rules(self) -> &'static [RuleKind] {
        match self {
            Self::Basic => BASIC_RULES,
            Self::Extended => EXTENDED_RULES,
        }
    }

    /// Whether `rule` belongs to this dialect.
    pub fn supports(self, rule: RuleKind) -> bool {
        self.rules().contains(&rule)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.name() == s)
            .ok_or_else(|| UnknownName::new("dialect", s, Self::ALL.map(Self::name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_extended() {
        assert_eq!(Dialect::default(), Dialect::Extended);
    }

    #[test]
    fn test_basic_is_prefix_of_extended() {
        let basic = Dialect::Basic.rules();
        let extended = Dialect::Extended.rules();
        assert!(basic.len() < extended.len());
        assert_eq!(basic, &extended[..basic.len()]);
    }

    #[test]
    fn test_basic_has_no_table() {
        assert!(!Dialect::Basic.supports(RuleKind::Table));
        assert!(Dialect::Extended.supports(RuleKind::Table));
    }

    #[test]
    fn test_parse_dialect() {
        assert_eq!("basic".parse::<Dialect>(), Ok(Dialect::Basic));
        assert_eq!("extended".parse::<Dialect>(), Ok(Dialect::Extended));
    }

    #[test]
    fn test_parse_dialect_is_case_sensitive() {
        let err = "Basic".parse::<Dialect>().unwrap_err();
        assert_eq!(err.kind, "dialect");
        assert!(err.to_string().contains("basic, extended"));
    }
}
