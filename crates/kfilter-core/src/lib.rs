//! # kubectl-filter core
//!
//! Field filtering for semi-structured documents decoded from JSON or YAML.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Rule parsing** - Compact `+keep,-drop` expressions into an ordered [`RuleSet`]
//! - **Tree filtering** - In-place keep/drop mutation of a decoded [`Value`]
//! - **Document codec** - JSON/YAML decode and encode
//! - **Configuration** - TOML configuration for the command-line tool
//!
//! ## Example
//!
//! ```rust
//! use kfilter_core::{filter, RuleSet};
//! use serde_json::json;
//!
//! let mut doc = json!({
//!     "metadata": { "name": "web", "selfLink": "/api/v1/pods/web", "labels": { "app": "web" } },
//!     "spec": { "nodeName": "node-1" }
//! });
//!
//! let mut rules = RuleSet::builtin();
//! rules.extend(RuleSet::parse_user("metadata.name,spec")?);
//!
//! filter::apply(Some(&mut doc), &rules);
//! assert_eq!(doc, json!({ "metadata": { "name": "web" }, "spec": { "nodeName": "node-1" } }));
//! # Ok::<(), kfilter_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod rule;

// Re-exports for convenience
pub use config::Config;
pub use document::Format;
pub use error::{Error, Result};
pub use rule::{FilterRule, Polarity, RuleSet};
pub use serde_json::Value;
