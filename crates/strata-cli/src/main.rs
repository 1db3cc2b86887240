mod commands;
mod input;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::rewrite::RewriteArgs;
use commands::upgrade::UpgradeArgs;
use opts::GlobalOpts;

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Block state upgrade and block entity rewrite tool")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded upgrade schemas
    Schemas,

    /// Upgrade a block state tag to the newest schema
    Upgrade(UpgradeArgs),

    /// Rewrite a block entity tree into the destination layout
    Rewrite(RewriteArgs),
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let opts = &cli.opts;

    match cli.command {
        Command::Schemas => commands::schemas::cmd_schemas(opts),
        Command::Upgrade(args) => commands::upgrade::cmd_upgrade(opts, &args),
        Command::Rewrite(args) => commands::rewrite::cmd_rewrite(opts, &args),
    }
}

/// Logs go to stderr so stdout stays parseable; `RUST_LOG` overrides the `info` default.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
