use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "dex-inspect")]
#[command(about = "Inspect event groups in a dex JSON file")]
#[command(long_about = "Reads a dex JSON file, deserializes every event group through the
factory registry and reports each group's name, type, origin and time range.

Groups with an unregistered type are skipped with a warning unless --strict
is given; malformed records always abort the run.")]
pub struct Config {
    /// Path to the dex JSON file to inspect
    pub file: PathBuf,

    /// Fail on unknown group types instead of skipping them
    #[arg(long, env = "DEX_INSPECT_STRICT")]
    pub strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DEX_INSPECT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(anyhow!("dex file '{}' does not exist", self.file.display()));
        }

        Ok(())
    }
}
