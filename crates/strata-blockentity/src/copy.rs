use strata_nbt::{CompoundTag, Tag, TagKind};

use crate::items::ItemMappings;

/// Substituted for item names the mapping table does not know.
pub const DEFAULT_ITEM: &str = "minecraft:stone";

const AIR: &str = "minecraft:air";

/// Copies `key` from `source` into `target` when it is present with the expected kind.
///
/// Returns whether the field was copied.
pub fn copy(source: &CompoundTag, target: &mut CompoundTag, key: &str, kind: TagKind) -> bool {
    match source.get(key) {
        Some(tag) if tag.kind() == kind => {
            target.put(key, tag.clone());
            true
        }
        Some(tag) => {
            log::debug!("not copying '{key}': expected {kind}, found {}", tag.kind());
            false
        }
        None => false,
    }
}

/// Converts the item compound at `key` (`Name`, `Count`) into a destination item
/// (`id`, `count`).
///
/// Absent, empty and air items are omitted. Names missing from `items` are
/// replaced by [`DEFAULT_ITEM`] with a warning.
pub fn copy_item(source: &CompoundTag, target: &mut CompoundTag, key: &str, items: &ItemMappings) {
    let Some(item) = source.get_compound(key) else {
        return;
    };
    let name = item.get_string("Name").unwrap_or_default();
    let count = item_count(item);
    if name.is_empty() || name == AIR || count <= 0 {
        return;
    }

    let id = match items.get(name) {
        Some(id) => id,
        None => {
            log::warn!("Missing item: {name}");
            DEFAULT_ITEM
        }
    };
    let mut converted = CompoundTag::new();
    converted.put_string("id", id);
    converted.put_int("count", count);
    target.put(key, converted);
}

fn item_count(item: &CompoundTag) -> i32 {
    match item.get("Count") {
        Some(Tag::Byte(count)) => i32::from(*count),
        Some(Tag::Short(count)) => i32::from(*count),
        Some(Tag::Int(count)) => *count,
        _ => 1,
    }
}
