//! In-memory site catalog and the builder that populates it.

pub mod builder;
mod model;
mod profiles;

pub use builder::{auxiliary_runs_locally, build};
pub use model::{
    Arch, CatalogDocument, Directory, DirectoryType, FileServer, GridDescriptor, GridType,
    JobType, LOCAL_SITE, Operation, Scheduler, SiteRecord,
};
pub use profiles::{Namespace, ProfileEntry, ProfileValue, Profiles};
