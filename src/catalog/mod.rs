//! Command catalog wiring.
//!
//! `CommandCatalog` owns accepted declarations while extensions are being
//! loaded. Sealing it hands out a `SealedCatalog`, the read-only view palette
//! and menu renderers consume; `CommandIndex` layers lookups on top of it.

pub mod index;
pub mod store;

pub use index::CommandIndex;
pub use store::{CatalogPhase, CommandCatalog, SealedCatalog};
