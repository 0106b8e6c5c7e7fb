pub mod catalog;
pub mod error;
pub mod params;
pub mod site;

pub use catalog::{CatalogDocument, SiteRecord};
pub use error::AppError;
pub use params::{Param, SiteParams};
pub use site::{ProjectRequirement, SiteKind, SiteRequirements, Supplied};
