use strata_nbt::{CompoundTag, TagKind};

use crate::copy::copy;
use crate::items::ItemMappings;

pub(crate) fn comparator(source: &CompoundTag, _items: &ItemMappings) -> CompoundTag {
    let mut target = CompoundTag::new();
    copy(source, &mut target, "OutputSignal", TagKind::Int);
    target
}
