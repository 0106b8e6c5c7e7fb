//! Site registry: supported site kinds and their parameter requirements.

mod kind;
mod requirements;

pub use kind::SiteKind;
pub use requirements::{
    PEGASUS_HOME_ENV, ProjectRequirement, SiteRequirements, Supplied, requirements_for,
};
