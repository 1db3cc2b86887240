//! `strata upgrade` command.

use anyhow::{Context, Result};
use clap::Args;
use strata_upgrade::SchemaVersion;

use crate::input::read_tag;
use crate::opts::GlobalOpts;
use crate::output::print_json;

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Block state tag as JSON (`name`, `states`, `version`); `-` reads stdin
    pub input: String,

    /// Version the input conforms to, overriding its `version` field
    #[arg(long)]
    pub from: Option<SchemaVersion>,
}

pub fn cmd_upgrade(opts: &GlobalOpts, args: &UpgradeArgs) -> Result<()> {
    let chain = opts.load_chain()?;
    let mut tag = read_tag(&args.input)?;
    if let Some(from) = args.from {
        tag.put_int("version", from.to_packed() as i32);
    }
    let version = chain
        .upgrade_tag(&mut tag)
        .context("block state has no string `name`")?;
    log::debug!("block state now at version {version}");
    print_json(opts, &tag)
}
