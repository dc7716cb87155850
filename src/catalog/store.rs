use crate::declaration::Command;
use crate::error::CatalogError;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogPhase {
    Loading,
    Sealed,
}

/// Ordered, append-only collection of accepted command declarations.
///
/// Appends are only possible while the catalog is [`CatalogPhase::Loading`].
/// After [`CommandCatalog::seal`] every append fails with
/// [`CatalogError::Sealed`] and the contents never change again.
#[derive(Debug, Default)]
pub struct CommandCatalog {
    entries: Vec<Command>,
    sealed: Option<SealedCatalog>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CatalogPhase {
        if self.sealed.is_some() {
            CatalogPhase::Sealed
        } else {
            CatalogPhase::Loading
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.is_some()
    }

    /// Fails without side effects once the catalog is sealed.
    pub(crate) fn ensure_loading(&self) -> Result<(), CatalogError> {
        if self.is_sealed() {
            return Err(CatalogError::Sealed);
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, command: Command) -> Result<(), CatalogError> {
        self.ensure_loading()?;
        self.entries.push(command);
        Ok(())
    }

    /// Accepted declarations in arrival order. Always readable.
    pub fn commands(&self) -> &[Command] {
        match &self.sealed {
            Some(sealed) => sealed.commands(),
            None => self.entries.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands().is_empty()
    }

    /// Freeze the catalog. Must be called exactly once, after the last
    /// contribution has been processed.
    pub fn seal(&mut self) -> Result<SealedCatalog, CatalogError> {
        if self.is_sealed() {
            return Err(CatalogError::AlreadySealed);
        }
        let sealed = SealedCatalog(Arc::from(std::mem::take(&mut self.entries)));
        tracing::info!(commands = sealed.len(), "command catalog sealed");
        self.sealed = Some(sealed.clone());
        Ok(sealed)
    }

    /// The frozen view, available once the catalog has been sealed.
    pub fn sealed(&self) -> Option<&SealedCatalog> {
        self.sealed.as_ref()
    }
}

/// Immutable, cheaply clonable view of a sealed catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SealedCatalog(Arc<[Command]>);

impl SealedCatalog {
    pub fn commands(&self) -> &[Command] {
        &self.0
    }
}

impl Deref for SealedCatalog {
    type Target = [Command];

    fn deref(&self) -> &[Command] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SealedCatalog {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(id: &str) -> Command {
        Command {
            command: id.to_string(),
            title: id.to_uppercase(),
            category: None,
            icon: None,
            contexts: Vec::new(),
        }
    }

    #[test]
    fn appends_keep_arrival_order() {
        let mut catalog = CommandCatalog::new();
        catalog.push(command("b")).unwrap();
        catalog.push(command("a")).unwrap();
        let ids: Vec<_> = catalog.commands().iter().map(|c| c.command.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(catalog.phase(), CatalogPhase::Loading);
    }

    #[test]
    fn sealed_catalog_rejects_appends() {
        let mut catalog = CommandCatalog::new();
        catalog.push(command("a")).unwrap();
        let sealed = catalog.seal().unwrap();
        assert_eq!(catalog.push(command("b")), Err(CatalogError::Sealed));
        assert_eq!(sealed.len(), 1);
        assert_eq!(catalog.commands(), sealed.commands());
        assert_eq!(catalog.phase(), CatalogPhase::Sealed);
    }

    #[test]
    fn seal_twice_is_an_error() {
        let mut catalog = CommandCatalog::new();
        catalog.seal().unwrap();
        assert_eq!(catalog.seal(), Err(CatalogError::AlreadySealed));
    }
}
