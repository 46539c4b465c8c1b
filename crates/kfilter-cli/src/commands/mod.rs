//! CLI commands
//!
//! kubectl-filter forwards its positional arguments to kubectl, so the
//! commands are selected by flags rather than subcommands.

pub mod completions;
pub mod explain;
pub mod run;

/// What a single invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Filter kubectl output or an input file (main command)
    Run,

    /// Print the effective rules
    Explain,

    /// Generate shell completions
    Completions(completions::ShellType),
}

impl Command {
    /// Select the command from parsed arguments
    pub fn from_args(args: &crate::args::Args) -> Self {
        if let Some(shell) = args.completions {
            Self::Completions(shell)
        } else if args.explain {
            Self::Explain
        } else {
            Self::Run
        }
    }
}
