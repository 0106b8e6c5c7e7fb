//! Per-site parameter requirements.
//!
//! The registry is a single lookup keyed by [`SiteKind`]. Callers consult it before
//! invoking the catalog builder; the builder itself trusts its input.

use super::SiteKind;

/// Whether a project allocation may or must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRequirement {
    Required,
    Optional,
    Forbidden,
}

/// Whether a caller-supplied value is accepted, and if so whether it is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supplied {
    Required,
    Optional,
    /// The site fixes this value itself.
    Fixed,
    NotAccepted,
}

impl Supplied {
    pub fn is_required(self) -> bool {
        self == Supplied::Required
    }

    pub fn is_accepted(self) -> bool {
        matches!(self, Supplied::Required | Supplied::Optional)
    }
}

/// Static facts about a site kind used to validate caller parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteRequirements {
    pub queue: Supplied,
    pub project: ProjectRequirement,
    pub pegasus_home: Supplied,
    pub login_host: Supplied,
    pub remote_scratch: Supplied,
    /// Scratch is reached through a transfer endpoint instead of a local path.
    pub remote: bool,
    /// Environment variable consulted for a default queue.
    pub queue_env: Option<&'static str>,
    /// Environment variable consulted for a default project.
    pub project_env: Option<&'static str>,
}

/// Environment variable consulted for a default runtime home.
pub const PEGASUS_HOME_ENV: &str = "PEGASUS_HOME";

const CONDOR: SiteRequirements = SiteRequirements {
    queue: Supplied::NotAccepted,
    project: ProjectRequirement::Forbidden,
    pegasus_home: Supplied::NotAccepted,
    login_host: Supplied::NotAccepted,
    remote_scratch: Supplied::NotAccepted,
    remote: false,
    queue_env: None,
    project_env: None,
};

const LOCAL_BATCH: SiteRequirements = SiteRequirements {
    queue: Supplied::Required,
    project: ProjectRequirement::Optional,
    pegasus_home: Supplied::Optional,
    login_host: Supplied::NotAccepted,
    remote_scratch: Supplied::NotAccepted,
    remote: false,
    queue_env: None,
    project_env: None,
};

const SUMMIT: SiteRequirements = SiteRequirements {
    queue: Supplied::Fixed,
    project: ProjectRequirement::Required,
    pegasus_home: Supplied::Fixed,
    login_host: Supplied::NotAccepted,
    remote_scratch: Supplied::NotAccepted,
    remote: false,
    queue_env: None,
    project_env: Some("LSB_DEFAULTPROJECT"),
};

impl SiteKind {
    /// Requirements for this site kind. Total over the enumeration.
    pub fn requirements(self) -> SiteRequirements {
        match self {
            SiteKind::CondorPool | SiteKind::OsgIsi => CONDOR,
            SiteKind::Slurm => SiteRequirements {
                queue_env: Some("SBATCH_PARTITION"),
                project_env: Some("SBATCH_ACCOUNT"),
                ..LOCAL_BATCH
            },
            SiteKind::RemoteSlurm => SiteRequirements {
                pegasus_home: Supplied::Required,
                login_host: Supplied::Required,
                remote_scratch: Supplied::Required,
                remote: true,
                queue_env: Some("SBATCH_PARTITION"),
                project_env: Some("SBATCH_ACCOUNT"),
                ..LOCAL_BATCH
            },
            SiteKind::Lsf => SiteRequirements {
                queue_env: Some("LSB_DEFAULTQUEUE"),
                project_env: Some("LSB_DEFAULTPROJECT"),
                ..LOCAL_BATCH
            },
            SiteKind::Sge => SiteRequirements {
                queue_env: Some("SGE_QUEUE"),
                project_env: Some("SGE_PROJECT"),
                ..LOCAL_BATCH
            },
            SiteKind::SummitGlite | SiteKind::SummitKubernetes => SUMMIT,
            SiteKind::UscHpcc => SiteRequirements {
                queue: Supplied::Fixed,
                pegasus_home: Supplied::Fixed,
                ..CONDOR
            },
        }
    }
}

/// Free-function form of [`SiteKind::requirements`].
pub fn requirements_for(kind: SiteKind) -> SiteRequirements {
    kind.requirements()
}
