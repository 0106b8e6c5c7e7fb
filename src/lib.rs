//! sitecat: Generate Pegasus site catalogs for common execution sites.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{GenerateOptions, GenerateOutcome, GenerateRequest, SiteSummary};
pub use app::config::{ParamOverrides, SiteDefaults};
pub use domain::catalog::{
    Arch, Directory, DirectoryType, FileServer, GridDescriptor, GridType, JobType, Namespace,
    Operation, ProfileValue, Profiles, Scheduler,
};
pub use domain::{AppError, CatalogDocument, Param, SiteKind, SiteParams, SiteRecord};

/// Build the catalog for `kind`. Parameters are assumed to be validated.
pub fn build(kind: SiteKind, params: &SiteParams) -> CatalogDocument {
    domain::catalog::build(kind, params)
}

/// Validate `params` for `kind`, then build its catalog.
pub fn build_checked(kind: SiteKind, params: &SiteParams) -> Result<CatalogDocument, AppError> {
    params.validate(kind)?;
    Ok(build(kind, params))
}

/// Render a catalog as Pegasus 5.0 YAML.
pub fn render(doc: &CatalogDocument) -> Result<String, AppError> {
    services::yaml_catalog::to_yaml(doc)
}

/// Parse Pegasus 5.0 YAML into a catalog.
pub fn parse(content: &str) -> Result<CatalogDocument, AppError> {
    services::yaml_catalog::from_yaml(content)
}

/// Every supported site kind, in registry order.
pub fn site_kinds() -> &'static [SiteKind] {
    &SiteKind::ALL
}

/// Generate and write a catalog in the current directory without prompting.
pub fn generate(options: GenerateOptions) -> Result<GenerateOutcome, AppError> {
    app::api::generate(options)
}
