//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use kfilter_core::Format;
use std::path::PathBuf;

use crate::commands::completions::ShellType;

/// kubectl-filter - strip noisy fields from kubectl output
///
/// Runs kubectl with the given arguments and filters the JSON/YAML it prints.
/// managedFields, selfLink and the last-applied-configuration annotation are
/// always removed unless --no-defaults is given.
///
/// Filter expressions are comma-separated dotted paths. A bare or `+` path
/// keeps that field and drops its siblings, a `-` path drops the field.
/// Write `\.` for a dot inside a key.
///
/// Options for kubectl-filter must come before the kubectl arguments.
#[derive(Parser, Debug)]
#[command(name = "kubectl-filter")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct Args {
    /// Filter expression, e.g. `metadata.name,spec,-spec.nodeName`
    #[arg(short = 'F', long, value_name = "EXPR")]
    pub filter: Option<String>,

    /// Output format (default: detected from kubectl's -o flag)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Filter a document from FILE instead of running kubectl ('-' for stdin)
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// kubectl binary to run
    #[arg(long, value_name = "PATH")]
    pub kubectl: Option<String>,

    /// Do not apply the built-in default drops
    #[arg(long)]
    pub no_defaults: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", env = "KUBECTL_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the effective filter rules and exit
    #[arg(long)]
    pub explain: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<ShellType>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Arguments passed through to kubectl
    #[arg(
        value_name = "KUBECTL_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub kubectl_args: Vec<String>,
}

/// Document output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

/// Find the output format requested from kubectl
///
/// Recognizes `-o FORMAT`, `-o=FORMAT`, `-oFORMAT`, `--output FORMAT` and
/// `--output=FORMAT`. Formats other than json and yaml are skipped, so
/// `-o wide` yields `None`.
pub fn detect_output_format(args: &[String]) -> Option<Format> {
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let value = match arg.as_str() {
            "-o" | "--output" => iter.next().map(String::as_str),
            other => other
                .strip_prefix("--output=")
                .or_else(|| other.strip_prefix("-o="))
                .or_else(|| other.strip_prefix("-o")),
        };

        if let Some(format) = value.and_then(|v| v.parse::<Format>().ok()) {
            return Some(format);
        }
    }

    None
}
