//! Document sources
//!
//! The document to filter comes from running kubectl, from a file, or from
//! stdin.

use anyhow::{bail, Context, Result};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Where the raw document bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Run kubectl and capture stdout
    Kubectl {
        /// Program to run
        binary: String,
        /// Arguments forwarded verbatim
        args: Vec<String>,
    },
    /// Read a file
    File(PathBuf),
    /// Read stdin
    Stdin,
}

impl Source {
    /// Source for an `--input` value, `-` meaning stdin
    pub fn from_input(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path)
        }
    }

    /// Fetch the raw document bytes
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::Kubectl { binary, args } => run_kubectl(binary, args),
            Self::File(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            Self::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .read_to_end(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
        }
    }
}

fn run_kubectl(binary: &str, args: &[String]) -> Result<Vec<u8>> {
    info!(binary, args = ?args, "Running kubectl");

    let output = Command::new(binary)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run '{binary}'"))?;

    if !output.status.success() {
        // Relay kubectl's own diagnostics unchanged.
        io::stderr()
            .write_all(&output.stderr)
            .context("Failed to write kubectl stderr")?;
        bail!("{binary} exited with {}", output.status);
    }

    debug!(bytes = output.stdout.len(), "kubectl finished");
    Ok(output.stdout)
}
