//! Filter rules
//!
//! A rule is a dotted key path plus a polarity. Rules are evaluated in order,
//! so a [`RuleSet`] is an ordered list rather than a set in the mathematical
//! sense. The built-in rules always come first and user rules are appended.

mod parser;

pub use parser::{parse, split_path};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Expression for the rules applied to every document unless disabled
pub const BUILTIN_EXPRESSION: &str = "metadata.managedFields,metadata.selfLink,metadata.annotations.kubectl\\.kubernetes\\.io/last-applied-configuration";

/// Whether a rule keeps or drops the field it names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Allow-list the field; unlisted siblings are pruned
    Keep,
    /// Remove the field immediately
    Drop,
}

impl Polarity {
    /// Expression marker for this polarity
    pub fn marker(self) -> char {
        match self {
            Self::Keep => '+',
            Self::Drop => '-',
        }
    }

    /// Polarity selected by a leading marker character, if it is one
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Keep),
            '-' => Some(Self::Drop),
            _ => None,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

/// One polarity + path instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterRule {
    /// Keep or drop
    pub polarity: Polarity,
    /// Literal key names from the document root; never empty
    pub path: Vec<String>,
}

impl FilterRule {
    /// Create a keep rule from path segments
    pub fn keep<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            polarity: Polarity::Keep,
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a drop rule from path segments
    pub fn drop<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            polarity: Polarity::Drop,
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this is a keep rule
    pub fn is_keep(&self) -> bool {
        self.polarity == Polarity::Keep
    }
}

/// Renders the canonical expression form with an explicit marker,
/// re-escaping dots inside segments.
///
/// Parsing the output yields the same rule for every path the expression
/// grammar can spell. A segment containing `,`, or a non-final segment ending
/// in `\`, has no expression form; such rules render for display only.
impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.polarity.marker())?;
        for (i, segment) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.replace('.', "\\."))?;
        }
        Ok(())
    }
}

/// Ordered sequence of filter rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<FilterRule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default drops
    ///
    /// Removes `metadata.managedFields`, `metadata.selfLink` and the
    /// `kubectl.kubernetes.io/last-applied-configuration` annotation. Equal to
    /// parsing [`BUILTIN_EXPRESSION`] with [`Polarity::Drop`] as the default.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                FilterRule::drop(["metadata", "managedFields"]),
                FilterRule::drop(["metadata", "selfLink"]),
                FilterRule::drop([
                    "metadata",
                    "annotations",
                    "kubectl.kubernetes.io/last-applied-configuration",
                ]),
            ],
        }
    }

    /// Parse user-supplied rules; bare paths default to [`Polarity::Keep`]
    pub fn parse_user(expression: &str) -> Result<Self> {
        parse(expression, Polarity::Keep)
    }

    /// Concatenate two rule sets, `first` evaluated before `second`
    pub fn chain(first: Self, second: Self) -> Self {
        let mut rules = first;
        rules.extend(second);
        rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, FilterRule> {
        self.rules.iter()
    }

    /// Rules as a slice
    pub fn as_slice(&self) -> &[FilterRule] {
        &self.rules
    }
}

impl Extend<FilterRule> for RuleSet {
    fn extend<T: IntoIterator<Item = FilterRule>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl FromIterator<FilterRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = FilterRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = FilterRule;
    type IntoIter = std::vec::IntoIter<FilterRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a FilterRule;
    type IntoIter = std::slice::Iter<'a, FilterRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// Parses with user semantics (bare paths keep)
impl FromStr for RuleSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_user(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_expression() {
        let parsed = parse(BUILTIN_EXPRESSION, Polarity::Drop).unwrap();
        assert_eq!(parsed, RuleSet::builtin());
    }

    #[test]
    fn test_builtin_is_all_drops() {
        let builtin = RuleSet::builtin();
        assert_eq!(builtin.len(), 3);
        assert!(builtin.iter().all(|r| r.polarity == Polarity::Drop));
    }

    #[test]
    fn test_display_reescapes_dots() {
        let rule = FilterRule::drop(["metadata", "annotations", "kubectl.kubernetes.io/x"]);
        assert_eq!(rule.to_string(), "-metadata.annotations.kubectl\\.kubernetes\\.io/x");

        let reparsed = parse(&rule.to_string(), Polarity::Keep).unwrap();
        assert_eq!(reparsed.as_slice(), &[rule]);
    }

    #[test]
    fn test_display_roundtrips_backslashes() {
        for rule in [
            FilterRule::keep(["a\\b", "c"]),
            FilterRule::drop(["a\\.b"]),
            FilterRule::keep(["x", "trailing\\"]),
        ] {
            let reparsed = parse(&rule.to_string(), Polarity::Drop).unwrap();
            assert_eq!(reparsed.as_slice(), &[rule]);
        }
    }

    #[test]
    fn test_display_of_unspellable_paths() {
        // Trailing backslash before a separator reads back as an escaped dot
        let rule = FilterRule::keep(["a\\", "b"]);
        assert_eq!(rule.to_string(), "+a\\.b");
        let reparsed = parse(&rule.to_string(), Polarity::Drop).unwrap();
        assert_ne!(reparsed.as_slice(), &[rule]);

        let rule = FilterRule::keep(["a,b"]);
        assert_eq!(parse(&rule.to_string(), Polarity::Drop).unwrap().len(), 2);
    }

    #[test]
    fn test_chain_order() {
        let user = RuleSet::parse_user("spec").unwrap();
        let all = RuleSet::chain(RuleSet::builtin(), user);

        assert_eq!(all.len(), 4);
        assert_eq!(all.as_slice()[3], FilterRule::keep(["spec"]));
    }

    #[test]
    fn test_from_str_is_user_semantics() {
        let rules: RuleSet = "metadata.name".parse().unwrap();
        assert!(rules.as_slice()[0].is_keep());
    }

    #[test]
    fn test_marker_roundtrip() {
        for polarity in [Polarity::Keep, Polarity::Drop] {
            assert_eq!(Polarity::from_marker(polarity.marker()), Some(polarity));
        }
        assert_eq!(Polarity::from_marker('m'), None);
    }
}
