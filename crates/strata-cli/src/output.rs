use anyhow::Result;
use serde::Serialize;

use crate::opts::GlobalOpts;

/// Prints `data` to stdout as JSON, honoring `--pretty`.
///
/// Serializes directly rather than through `serde_json::Value`, whose map would
/// sort tag keys.
pub fn print_json<T: Serialize + ?Sized>(opts: &GlobalOpts, data: &T) -> Result<()> {
    if opts.pretty {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        println!("{}", serde_json::to_string(data)?);
    }
    Ok(())
}
