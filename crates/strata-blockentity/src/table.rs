use indexmap::IndexMap;
use once_cell::sync::Lazy;
use strata_nbt::CompoundTag;

use crate::converters;
use crate::items::ItemMappings;

/// Converts one source block-entity tree into its destination equivalent.
pub type RewriteFn = fn(&CompoundTag, &ItemMappings) -> CompoundTag;

static REWRITERS: Lazy<IndexMap<&'static str, RewriteFn>> = Lazy::new(|| {
    let entries: [(&'static str, RewriteFn); 3] = [
        ("DecoratedPot", converters::decorated_pot),
        ("EndGateway", converters::end_gateway),
        ("Comparator", converters::comparator),
    ];
    entries.into_iter().collect()
});

pub fn rewriter_table() -> &'static IndexMap<&'static str, RewriteFn> {
    &REWRITERS
}

pub fn find_rewriter(identifier: &str) -> Option<RewriteFn> {
    REWRITERS.get(identifier).copied()
}

/// Rewriter table bound to the item mappings it translates through.
///
/// Immutable after construction; share it behind `&` or `Arc`.
#[derive(Debug, Clone, Default)]
pub struct BlockEntityRewriter {
    items: ItemMappings,
}

impl BlockEntityRewriter {
    pub fn new(items: ItemMappings) -> Self {
        Self { items }
    }

    /// Returns `None` only when no converter is registered for `identifier`.
    pub fn rewrite(&self, identifier: &str, source: &CompoundTag) -> Option<CompoundTag> {
        let Some(rewrite) = find_rewriter(identifier) else {
            log::debug!("no block entity rewriter for {identifier}");
            return None;
        };
        Some(rewrite(source, &self.items))
    }
}
