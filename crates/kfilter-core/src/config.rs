//! Configuration management for kubectl-filter
//!
//! Provides a strongly-typed configuration system with TOML support.
//! Every section is optional and falls back to its defaults.

use crate::document::DEFAULT_JSON_INDENT;
use crate::error::{Error, Result};
use crate::rule::{self, Polarity, RuleSet};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Widest JSON indentation accepted
pub const MAX_JSON_INDENT: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter settings
    pub filters: FiltersConfig,

    /// kubectl invocation settings
    pub kubectl: KubectlConfig,

    /// Output settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.kubectl.binary.trim().is_empty() {
            return Err(Error::config_value("kubectl.binary", "Must not be empty"));
        }

        if self.output.json_indent > MAX_JSON_INDENT {
            return Err(Error::config_value(
                "output.json_indent",
                format!("Must be at most {MAX_JSON_INDENT}"),
            ));
        }

        if let Err(e) = rule::parse(&self.filters.extra, Polarity::Keep) {
            return Err(Error::config_value("filters.extra", e.to_string()));
        }

        Ok(())
    }

    /// Assemble the effective rules for one run
    ///
    /// Order is built-in drops (unless disabled), then `filters.extra`, then
    /// the command-line expression. Both expressions use keep as the default.
    pub fn rule_set(&self, cli_expression: Option<&str>) -> Result<RuleSet> {
        let mut rules = if self.filters.builtin {
            RuleSet::builtin()
        } else {
            RuleSet::new()
        };

        rules.extend(RuleSet::parse_user(&self.filters.extra)?);
        if let Some(expression) = cli_expression {
            rules.extend(RuleSet::parse_user(expression)?);
        }

        Ok(rules)
    }
}

/// Filter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Prepend the built-in default drops
    pub builtin: bool,
    /// Expression applied on every run, before the command-line filter
    pub extra: String,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            extra: String::new(),
        }
    }
}

/// kubectl invocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubectlConfig {
    /// Program name or path
    pub binary: String,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            binary: "kubectl".to_string(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Spaces per JSON indentation level
    pub json_indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}
