//! Indexed view of a sealed command catalog.
//!
//! Palette and menu renderers read through this index. Duplicate command ids
//! are tolerated: the first declaration owns the id for lookups, but every
//! declaration still shows up in listings.

use crate::catalog::SealedCatalog;
use crate::declaration::{Command, Where};
use std::collections::BTreeMap;

#[derive(Debug)]
/// Sealed catalog plus a derived index keyed by command id.
pub struct CommandIndex {
    catalog: SealedCatalog,
    by_id: BTreeMap<String, usize>,
}

impl CommandIndex {
    pub fn new(catalog: SealedCatalog) -> Self {
        let mut by_id = BTreeMap::new();
        for (position, command) in catalog.iter().enumerate() {
            if by_id.contains_key(&command.command) {
                tracing::warn!(command = %command.command, "duplicate command id in catalog");
                continue;
            }
            by_id.insert(command.command.clone(), position);
        }
        Self { catalog, by_id }
    }

    /// Resolve a command by id.
    pub fn command(&self, id: &str) -> Option<&Command> {
        self.by_id.get(id).map(|&position| &self.catalog[position])
    }

    /// Iterates command ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    /// Every declaration ordered by palette label, ties kept in catalog order.
    pub fn palette(&self) -> Vec<&Command> {
        let mut entries: Vec<&Command> = self.catalog.iter().collect();
        entries.sort_by_cached_key(|command| command.label());
        entries
    }

    /// Declarations placed at `site`, in catalog order.
    pub fn menu(&self, site: Where) -> impl Iterator<Item = &Command> {
        self.catalog.iter().filter(move |command| command.appears_in(site))
    }

    pub fn catalog(&self) -> &SealedCatalog {
        &self.catalog
    }
}
