//! Generate command: validate parameters, build the catalog, persist it.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::domain::catalog::build;
use crate::domain::{AppError, Param, SiteKind, SiteParams};
use crate::ports::CatalogStore;
use crate::services::yaml_catalog;

/// A fully resolved generate request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub kind: SiteKind,
    pub params: SiteParams,
    /// Where to write the catalog. `None` leaves persistence to the caller.
    pub output: Option<PathBuf>,
}

/// Result of a successful generate.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub kind: SiteKind,
    pub site_name: &'static str,
    pub output: Option<PathBuf>,
    pub yaml: String,
    /// Supplied parameters the site did not use.
    pub ignored: Vec<Param>,
}

pub fn execute<S: CatalogStore>(
    ctx: &AppContext<S>,
    request: GenerateRequest,
) -> Result<GenerateOutcome, AppError> {
    let GenerateRequest { kind, params, output } = request;
    params.validate(kind)?;

    let ignored = params.ignored(kind);
    for param in &ignored {
        tracing::warn!(site = %kind, "ignoring {}: the site does not use it", param.describe());
    }

    tracing::debug!(site = %kind, ?params, "building site catalog");
    let doc = build(kind, &params);
    let yaml = yaml_catalog::to_yaml(&doc)?;

    if let Some(path) = &output {
        ctx.store().write_catalog(path, &yaml)?;
        tracing::info!(path = %path.display(), sites = doc.sites().len(), "wrote site catalog");
    }

    Ok(GenerateOutcome { kind, site_name: kind.site_name(), output, yaml, ignored })
}
