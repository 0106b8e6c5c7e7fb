use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::CatalogStore;

/// In-memory catalog store for command tests.
#[derive(Default)]
pub struct MemoryCatalogStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    should_fail: bool,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes always fail.
    pub fn failing() -> Self {
        Self { should_fail: true, ..Self::default() }
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_catalog(&self, path: &Path) -> Result<String, AppError> {
        self.file(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())).into()
        })
    }

    fn write_catalog(&self, path: &Path, content: &str) -> Result<(), AppError> {
        if self.should_fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only store").into());
        }
        self.files.borrow_mut().insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
