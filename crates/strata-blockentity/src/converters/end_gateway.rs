use strata_nbt::{CompoundTag, Tag};

use crate::items::ItemMappings;

pub(crate) fn end_gateway(source: &CompoundTag, _items: &ItemMappings) -> CompoundTag {
    let mut target = CompoundTag::new();
    if let Some(age) = source.get_int("Age") {
        target.put_long("Age", i64::from(age));
    }
    if let Some(exit_portal) = source.get_int_list("ExitPortal") {
        target.put("exit_portal", Tag::IntArray(exit_portal));
    }
    target
}
