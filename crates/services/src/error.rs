//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use theory_core::catalog::CatalogError;

/// Errors emitted while assembling `StudyServices`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServicesError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
