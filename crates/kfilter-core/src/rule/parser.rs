//! Filter expression parser
//!
//! Grammar:
//!
//! ```text
//! expression := rule ("," rule)*
//! rule       := ["+" | "-"] path
//! path       := segment ("." segment)*
//! ```
//!
//! Inside a segment `\.` stands for a literal dot. Every other backslash is
//! kept as-is, so `a\b` is the single segment `a\b`.

use super::{FilterRule, Polarity, RuleSet};
use crate::error::{Error, Result};
use tracing::trace;

const SEPARATOR: char = '.';
const ESCAPE: char = '\\';

/// Parse a filter expression into an ordered rule set
///
/// Rules without a leading `+`/`-` marker take `default_polarity`.
/// An empty expression yields an empty rule set.
///
/// # Errors
///
/// Returns [`Error::Parse`] for an empty rule token (`a,,b`), a marker with no
/// path (`+`), or an empty path segment (`a..b`, `.a`, `a.`).
pub fn parse(expression: &str, default_polarity: Polarity) -> Result<RuleSet> {
    if expression.is_empty() {
        return Ok(RuleSet::new());
    }

    let rules = expression
        .split(',')
        .map(|token| parse_rule(token, default_polarity))
        .collect::<Result<RuleSet>>()?;

    trace!(count = rules.len(), "Parsed filter expression");
    Ok(rules)
}

fn parse_rule(token: &str, default_polarity: Polarity) -> Result<FilterRule> {
    let mut chars = token.chars();
    let (polarity, body) = match chars.next().and_then(Polarity::from_marker) {
        Some(polarity) => (polarity, chars.as_str()),
        None => (default_polarity, token),
    };

    if token.is_empty() {
        return Err(Error::parse(token, "empty rule"));
    }
    if body.is_empty() {
        return Err(Error::parse(token, "missing path after marker"));
    }

    let path = split_path(body);
    if path.iter().any(String::is_empty) {
        return Err(Error::parse(token, "empty path segment"));
    }

    Ok(FilterRule { polarity, path })
}

/// Split a dotted path into segments, unescaping `\.` into a literal dot
///
/// Escapes are resolved in the same pass that finds separators, so unescaped
/// content can never be mistaken for a split point.
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE if chars.peek() == Some(&SEPARATOR) => {
                chars.next();
                current.push(SEPARATOR);
            }
            SEPARATOR => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
}
