//! `strata rewrite` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use strata_blockentity::{BlockEntityRewriter, ItemMappings, rewriter_table};

use crate::input::read_tag;
use crate::opts::GlobalOpts;
use crate::output::print_json;

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Block entity identifier, e.g. DecoratedPot
    pub identifier: String,

    /// Block entity tree as JSON; `-` reads stdin
    pub input: String,

    /// JSON object mapping source item identifiers to destination identifiers
    #[arg(long)]
    pub items: Option<PathBuf>,
}

pub fn cmd_rewrite(opts: &GlobalOpts, args: &RewriteArgs) -> Result<()> {
    let items = match &args.items {
        Some(path) => ItemMappings::load(path)
            .with_context(|| format!("failed to load item mappings {}", path.display()))?,
        None => ItemMappings::new(),
    };
    let rewriter = BlockEntityRewriter::new(items);
    let source = read_tag(&args.input)?;
    let target = rewriter.rewrite(&args.identifier, &source).with_context(|| {
        let known: Vec<&str> = rewriter_table().keys().copied().collect();
        format!(
            "no block entity rewriter for '{}' (known: {})",
            args.identifier,
            known.join(", ")
        )
    })?;
    print_json(opts, &target)
}
