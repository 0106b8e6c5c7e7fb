//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation,
//! defaults resolution and command execution.

use std::path::{Path, PathBuf};

use crate::app::commands::{generate, show, sites};
use crate::app::config::{self, DEFAULT_OUTPUT, ParamOverrides, SiteDefaults};
use crate::app::AppContext;
use crate::domain::{AppError, CatalogDocument, SiteKind};
use crate::services::FilesystemCatalogStore;

pub use crate::app::commands::generate::{GenerateOutcome, GenerateRequest};
pub use crate::app::commands::sites::SiteSummary;

/// Options for a non-interactive generate.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Site to generate. Falls back to `site.site` from the defaults file.
    pub site: Option<SiteKind>,
    pub overrides: ParamOverrides,
    /// Defaults file to load instead of `sitecat.toml`.
    pub config: Option<PathBuf>,
    /// Catalog path. Falls back to `site.output`, then `sites.yml`.
    pub output: Option<PathBuf>,
    /// Render without writing anything.
    pub dry_run: bool,
}

/// Create an `AppContext` for a given path.
fn create_context(root: PathBuf) -> AppContext<FilesystemCatalogStore> {
    AppContext::new(FilesystemCatalogStore::new(root))
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Generate a catalog in the current directory.
pub fn generate(options: GenerateOptions) -> Result<GenerateOutcome, AppError> {
    generate_at(std::env::current_dir()?, options)
}

/// Generate a catalog with `root` as the working directory.
pub fn generate_at(
    root: impl Into<PathBuf>,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let root = root.into();
    let defaults = load_defaults_at(&root, options.config.as_deref())?;
    let kind = match options.site {
        Some(kind) => kind,
        None => default_site(&defaults)?.ok_or_else(|| {
            AppError::Validation(
                "No site given: pass one or set site.site in the defaults file".to_string(),
            )
        })?,
    };
    let request = request_at(
        &root,
        kind,
        &options.overrides,
        &defaults,
        options.output,
        options.dry_run,
    );
    execute_at(root, request)
}

/// Load the defaults file that applies to `root`.
pub fn load_defaults_at(root: &Path, explicit: Option<&Path>) -> Result<SiteDefaults, AppError> {
    config::load_defaults(root, explicit)
}

/// Site kind named by the defaults file, if any.
pub fn default_site(defaults: &SiteDefaults) -> Result<Option<SiteKind>, AppError> {
    defaults.site.site.as_deref().map(str::parse::<SiteKind>).transpose()
}

/// Resolve flags, defaults and the process environment into a request.
///
/// The request is not validated; missing parameters surface when it executes.
pub fn request_at(
    root: &Path,
    kind: SiteKind,
    overrides: &ParamOverrides,
    defaults: &SiteDefaults,
    output: Option<PathBuf>,
    dry_run: bool,
) -> GenerateRequest {
    let params = config::resolve_params(kind, overrides, defaults, process_env, root);
    let output = (!dry_run).then(|| {
        output
            .or_else(|| defaults.site.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    });
    GenerateRequest { kind, params, output }
}

/// Execute a resolved request, writing relative outputs under `root`.
pub fn execute_at(
    root: impl Into<PathBuf>,
    request: GenerateRequest,
) -> Result<GenerateOutcome, AppError> {
    let ctx = create_context(root.into());
    generate::execute(&ctx, request)
}

/// Describe every supported site kind.
pub fn sites() -> Vec<SiteSummary> {
    sites::list()
}

/// Parse the catalog at `path`, relative to the current directory.
pub fn show(path: &Path) -> Result<CatalogDocument, AppError> {
    show_at(std::env::current_dir()?, path)
}

/// Parse the catalog at `path`, relative to `root`.
pub fn show_at(root: impl Into<PathBuf>, path: &Path) -> Result<CatalogDocument, AppError> {
    let ctx = create_context(root.into());
    show::execute(&ctx, path)
}
