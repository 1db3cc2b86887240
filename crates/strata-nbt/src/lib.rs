//! In-memory tag tree shared by the block-state upgrader and the block-entity rewriters.

mod compound;
mod tag;

pub use compound::CompoundTag;
pub use tag::{Tag, TagKind};
