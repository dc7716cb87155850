//! Lifecycle errors surfaced to callers of the contribution handler.

use thiserror::Error;

/// Misuse of a [`crate::catalog::CommandCatalog`] after it has been sealed.
///
/// Either variant indicates a phase-ordering bug in the caller; the catalog
/// itself is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("command catalog is sealed; contributions can no longer be added")]
    Sealed,
    #[error("command catalog was already sealed")]
    AlreadySealed,
}
