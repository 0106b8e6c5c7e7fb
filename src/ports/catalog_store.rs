use std::path::Path;

use crate::domain::AppError;

/// Port for persisting rendered catalogs.
pub trait CatalogStore {
    /// Whether a catalog already exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the catalog text stored at `path`.
    fn read_catalog(&self, path: &Path) -> Result<String, AppError>;

    /// Write rendered catalog text to `path`, replacing any previous content.
    fn write_catalog(&self, path: &Path, content: &str) -> Result<(), AppError>;
}
