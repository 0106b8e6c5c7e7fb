//! Show command: parse an existing catalog.

use std::path::Path;

use crate::app::AppContext;
use crate::domain::{AppError, CatalogDocument};
use crate::ports::CatalogStore;
use crate::services::yaml_catalog;

pub fn execute<S: CatalogStore>(
    ctx: &AppContext<S>,
    path: &Path,
) -> Result<CatalogDocument, AppError> {
    if !ctx.store().exists(path) {
        return Err(AppError::Validation(format!("No site catalog at {}", path.display())));
    }
    let content = ctx.store().read_catalog(path)?;
    yaml_catalog::from_yaml(&content)
}
