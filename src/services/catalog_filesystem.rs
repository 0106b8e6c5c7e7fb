use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::CatalogStore;

/// Filesystem-based catalog store rooted at a working directory.
///
/// Relative paths resolve against the root; absolute paths are used as given.
#[derive(Debug, Clone)]
pub struct FilesystemCatalogStore {
    root: PathBuf,
}

impl FilesystemCatalogStore {
    /// Create a catalog store for the given root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl CatalogStore for FilesystemCatalogStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_catalog(&self, path: &Path) -> Result<String, AppError> {
        Ok(fs::read_to_string(self.resolve(path))?)
    }

    fn write_catalog(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        Ok(())
    }
}
