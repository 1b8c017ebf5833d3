pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_CONFIG_FILE: &str = ".mtga.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "mtga")]
#[command(about = "Fetches Magic: The Gathering set data and ranks cards by board impact")]
#[command(version)]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the cached set files")]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL of the card catalog API")]
    pub api_host: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Score every card in a set and list the ones with the most board impact
    Analyse {
        set_code: String,
        #[arg(long, help = "Force a fresh pull of the set data")]
        refresh: bool,
    },
    /// Get data about sets
    Get {
        #[command(subcommand)]
        target: GetCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum GetCommand {
    /// List every set the catalog knows about
    Sets {
        #[arg(long, help = "Force a fresh pull of the sets data")]
        refresh: bool,
    },
    /// List the raw cards of one set
    Set {
        set_code: String,
        #[arg(long, help = "Force a fresh pull of the set data")]
        refresh: bool,
    },
}

impl CliConfig {
    /// Loads the configuration file (explicit, or `~/.mtga.toml` when present)
    /// and applies command-line overrides on top of it.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => {
                let default_path = home_dir().join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    tracing::debug!("Using configuration from {}", default_path.display());
                    TomlConfig::from_file(&default_path)?
                } else {
                    TomlConfig::default()
                }
            }
        };

        if let Some(dir) = &self.cache_dir {
            config.cache.dir = dir.clone();
        }
        if let Some(host) = &self.api_host {
            config.catalog.host = host.clone();
        }

        Ok(config)
    }
}

pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
