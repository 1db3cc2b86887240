//! Global CLI options shared by every subcommand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use strata_upgrade::{ChainConfig, SchemaChain, SchemaVersion};

/// These options apply to all commands and can be set via env vars.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Directory of upgrade rule documents (env: STRATA_SCHEMA_DIR)
    #[arg(long = "schemas", global = true, env = "STRATA_SCHEMA_DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Ignore schemas newer than this version, e.g. 1.21.0.0 (env: STRATA_MAX_SCHEMA_VERSION)
    #[arg(long, global = true, env = "STRATA_MAX_SCHEMA_VERSION")]
    pub max_version: Option<SchemaVersion>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

impl GlobalOpts {
    pub fn chain_config(&self) -> ChainConfig {
        let mut config = match &self.schema_dir {
            Some(dir) => ChainConfig::new(dir),
            None => ChainConfig::default(),
        };
        config.max_version = self.max_version;
        config
    }

    pub fn load_chain(&self) -> Result<SchemaChain> {
        let config = self.chain_config();
        SchemaChain::load_dir(&config).with_context(|| {
            format!(
                "failed to load upgrade schemas from {}",
                config.schema_dir.display()
            )
        })
    }
}
