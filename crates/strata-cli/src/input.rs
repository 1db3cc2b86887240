use std::io::Read;

use anyhow::{Context, Result};
use strata_nbt::CompoundTag;

/// Reads `source` as a file path, or stdin when it is `-`.
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read file: {source}"))
    }
}

pub fn read_tag(source: &str) -> Result<CompoundTag> {
    let text = read_input(source)?;
    serde_json::from_str(&text).with_context(|| format!("{source} is not a JSON tag tree"))
}
