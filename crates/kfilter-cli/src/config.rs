//! Configuration discovery
//!
//! Search order: `--config` / `KUBECTL_FILTER_CONFIG`, `./kubectl-filter.toml`,
//! then `config.toml` in the user config directory. Without a file the
//! defaults apply.

use anyhow::{Context, Result};
use kfilter_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::args::Args;

const LOCAL_CONFIG: &str = "kubectl-filter.toml";

/// Load and validate the configuration, then apply command-line overrides
pub fn load(args: &Args) -> Result<Config> {
    let path = args.config.clone().or_else(find_config_file);

    let mut config = match path {
        Some(ref path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "Loaded configuration");
            config
        }
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    if let Some(ref binary) = args.kubectl {
        config.kubectl.binary.clone_from(binary);
    }
    if args.no_defaults {
        config.filters.builtin = false;
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

/// Per-user configuration file location
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "kubectl-filter")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    user_config_path().filter(|path| path.exists())
}
