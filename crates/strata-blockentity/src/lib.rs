//! Block-entity rewriters: translate source-dialect block-entity trees into the
//! destination dialect through an identifier-keyed table of plain functions.

mod converters;
mod copy;
mod items;
mod table;

pub use copy::{DEFAULT_ITEM, copy, copy_item};
pub use items::{ItemMappings, ItemMappingsError};
pub use table::{BlockEntityRewriter, RewriteFn, find_rewriter, rewriter_table};
