//! Explain command - print the effective rule set

use anyhow::Result;
use colored::Colorize;
use kfilter_core::{Polarity, RuleSet};
use std::io::{self, Write};

/// Print rules in evaluation order
pub fn execute(rules: &RuleSet) -> Result<()> {
    let mut out = io::stdout().lock();

    if rules.is_empty() {
        writeln!(out, "{}", "(no rules)".dimmed())?;
        return Ok(());
    }

    for (i, rule) in rules.iter().enumerate() {
        let label = match rule.polarity {
            Polarity::Keep => rule.polarity.to_string().green(),
            Polarity::Drop => rule.polarity.to_string().red(),
        };
        writeln!(out, "{:>3}. {:<4} {}", i + 1, label, rule)?;
    }

    Ok(())
}
