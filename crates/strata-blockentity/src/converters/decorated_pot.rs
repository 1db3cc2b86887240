use strata_nbt::{CompoundTag, Tag, TagKind};

use crate::copy::{copy, copy_item};
use crate::items::ItemMappings;

/// Face used for sherd slots that are blank or cannot be translated.
const DEFAULT_SHERD: &str = "minecraft:brick";

pub(crate) fn decorated_pot(source: &CompoundTag, items: &ItemMappings) -> CompoundTag {
    let mut target = CompoundTag::new();
    if let Some(sherds) = source.get_string_list("sherds") {
        let sherds: Vec<Tag> = sherds
            .into_iter()
            .map(|sherd| Tag::from(sherd_face(sherd, items)))
            .collect();
        target.put("sherds", sherds);
    }
    copy_item(source, &mut target, "item", items);
    copy(source, &mut target, "LootTable", TagKind::String);
    copy(source, &mut target, "LootTableSeed", TagKind::Int);
    target
}

fn sherd_face<'a>(sherd: &str, items: &'a ItemMappings) -> &'a str {
    if let Some(face) = items.get(sherd) {
        return face;
    }
    if !sherd.is_empty() {
        log::warn!("Missing item: {sherd}");
    }
    DEFAULT_SHERD
}
