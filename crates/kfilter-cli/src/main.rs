//! kubectl-filter CLI
//!
//! Runs kubectl and strips managed fields, self links and other noise from
//! the JSON/YAML it returns.

mod args;
mod commands;
mod config;
mod logging;
mod source;

use anyhow::Result;
use clap::Parser;
use kfilter_core::{Config, RuleSet};
use tracing::debug;

use args::Args;
use commands::Command;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    logging::init(&args)?;

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    match Command::from_args(args) {
        Command::Completions(shell) => commands::completions::execute(shell),
        Command::Explain => {
            let (_, rules) = load_rules(args)?;
            commands::explain::execute(&rules)
        }
        Command::Run => {
            let (config, rules) = load_rules(args)?;
            commands::run::execute(args, &config, &rules)
        }
    }
}

fn load_rules(args: &Args) -> Result<(Config, RuleSet)> {
    let config = config::load(args)?;
    let rules = config.rule_set(args.filter.as_deref())?;
    debug!(rules = %rules, "Effective filter rules");
    Ok((config, rules))
}
