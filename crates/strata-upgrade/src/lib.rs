//! Versioned block-state upgrade engine: compiles declarative upgrade rule documents
//! into data-only action lists and applies them to historical state records in
//! ascending version order.

mod action;
mod chain;
mod compile;
pub mod config;
pub mod model;
pub mod schemas;
mod state;
mod version;

pub use action::{Action, ControlSignal, FlattenRule, NameResolver, RemapEntry, ValueRemap, ValueTable};
pub use chain::{ChainLoadError, SchemaChain};
pub use compile::{Schema, SchemaFormatError, compile};
pub use config::ChainConfig;
pub use state::{Properties, PropertyValue, StateRecord};
pub use version::{SchemaVersion, VersionParseError};
