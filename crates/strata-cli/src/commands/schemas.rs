//! `strata schemas` command.

use anyhow::Result;
use serde_json::{Value, json};

use crate::opts::GlobalOpts;
use crate::output::print_json;

pub fn cmd_schemas(opts: &GlobalOpts) -> Result<()> {
    let chain = opts.load_chain()?;
    let schemas: Vec<Value> = chain
        .schemas()
        .iter()
        .map(|schema| {
            json!({
                "version": schema.version().to_string(),
                "actions": schema.actions().len(),
                "file": schema.label(),
            })
        })
        .collect();
    let latest = chain.latest_version().map(|version| version.to_string());
    print_json(opts, &json!({ "latest": latest, "schemas": schemas }))
}
