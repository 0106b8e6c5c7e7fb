//! Parameter bundle handed to the catalog builder.

use std::path::{Path, PathBuf};

use url::Url;

use crate::domain::AppError;
use crate::domain::site::{ProjectRequirement, SiteKind, Supplied};

/// Scheme prefix of a transfer endpoint served from the local filesystem.
pub const LOCAL_FILE_ENDPOINT: &str = "file://";

/// Caller-supplied values for a catalog build.
///
/// Optional text fields treat an empty string the same as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteParams {
    pub scratch_parent: PathBuf,
    pub storage_parent: PathBuf,
    pub project: Option<String>,
    pub queue: Option<String>,
    pub pegasus_home: Option<String>,
    pub login_host: Option<String>,
    pub transfer_endpoint: Option<String>,
    pub remote_scratch_parent: Option<PathBuf>,
}

/// Parameters that can be checked against a site's requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Queue,
    Project,
    PegasusHome,
    LoginHost,
    TransferEndpoint,
    RemoteScratch,
}

impl Param {
    pub fn describe(self) -> &'static str {
        match self {
            Param::Queue => "a queue name",
            Param::Project => "a project allocation",
            Param::PegasusHome => "a Pegasus home directory",
            Param::LoginHost => "a login host",
            Param::TransferEndpoint => "a transfer endpoint",
            Param::RemoteScratch => "a remote scratch directory",
        }
    }
}

impl SiteParams {
    pub fn new(scratch_parent: impl Into<PathBuf>, storage_parent: impl Into<PathBuf>) -> Self {
        Self {
            scratch_parent: scratch_parent.into(),
            storage_parent: storage_parent.into(),
            ..Default::default()
        }
    }

    pub fn project(&self) -> Option<&str> {
        non_empty(&self.project)
    }

    pub fn queue(&self) -> Option<&str> {
        non_empty(&self.queue)
    }

    pub fn pegasus_home(&self) -> Option<&str> {
        non_empty(&self.pegasus_home)
    }

    pub fn login_host(&self) -> Option<&str> {
        non_empty(&self.login_host)
    }

    /// Transfer endpoint, falling back to the local filesystem scheme.
    pub fn transfer_endpoint(&self) -> &str {
        non_empty(&self.transfer_endpoint).unwrap_or(LOCAL_FILE_ENDPOINT)
    }

    pub fn remote_scratch_parent(&self) -> Option<&Path> {
        self.remote_scratch_parent.as_deref().filter(|path| !path.as_os_str().is_empty())
    }

    /// Return a copy with `param` set to `value`.
    pub fn with_param(self, param: Param, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match param {
            Param::Queue => Self { queue: value, ..self },
            Param::Project => Self { project: value, ..self },
            Param::PegasusHome => Self { pegasus_home: value, ..self },
            Param::LoginHost => Self { login_host: value, ..self },
            Param::TransferEndpoint => Self { transfer_endpoint: value, ..self },
            Param::RemoteScratch => {
                Self { remote_scratch_parent: value.map(PathBuf::from), ..self }
            }
        }
    }

    fn is_supplied(&self, param: Param) -> bool {
        match param {
            Param::Queue => self.queue().is_some(),
            Param::Project => self.project().is_some(),
            Param::PegasusHome => self.pegasus_home().is_some(),
            Param::LoginHost => self.login_host().is_some(),
            Param::TransferEndpoint => non_empty(&self.transfer_endpoint).is_some(),
            Param::RemoteScratch => self.remote_scratch_parent().is_some(),
        }
    }

    /// Parameters the site still needs before the builder can run.
    pub fn missing(&self, kind: SiteKind) -> Vec<Param> {
        let reqs = kind.requirements();
        let mut missing = Vec::new();
        let checks = [
            (Param::Queue, reqs.queue.is_required()),
            (Param::Project, reqs.project == ProjectRequirement::Required),
            (Param::PegasusHome, reqs.pegasus_home.is_required()),
            (Param::LoginHost, reqs.login_host.is_required()),
            (Param::RemoteScratch, reqs.remote_scratch.is_required()),
        ];
        for (param, required) in checks {
            if required && !self.is_supplied(param) {
                missing.push(param);
            }
        }
        missing
    }

    /// Supplied parameters that the site fixes itself or has no use for.
    pub fn ignored(&self, kind: SiteKind) -> Vec<Param> {
        let reqs = kind.requirements();
        let accepts = |supplied: Supplied| supplied.is_accepted();
        [
            (Param::Queue, accepts(reqs.queue)),
            (Param::PegasusHome, accepts(reqs.pegasus_home)),
            (Param::LoginHost, accepts(reqs.login_host)),
            (Param::TransferEndpoint, reqs.remote),
            (Param::RemoteScratch, accepts(reqs.remote_scratch)),
        ]
        .into_iter()
        .filter(|&(param, accepted)| !accepted && self.is_supplied(param))
        .map(|(param, _)| param)
        .collect()
    }

    /// Check the bundle against the site's requirements.
    pub fn validate(&self, kind: SiteKind) -> Result<(), AppError> {
        let site = kind.cli_name();

        require_absolute(&self.scratch_parent, "scratch directory")?;
        require_absolute(&self.storage_parent, "storage directory")?;

        if let Some(param) = self.missing(kind).first() {
            return Err(AppError::missing(site, param.describe()));
        }

        if kind.requirements().project == ProjectRequirement::Forbidden && self.project().is_some()
        {
            return Err(AppError::forbidden(site, Param::Project.describe()));
        }

        if let Some(path) = self.remote_scratch_parent() {
            require_absolute(path, "remote scratch directory")?;
        }

        if let Some(endpoint) = non_empty(&self.transfer_endpoint) {
            Url::parse(endpoint).map_err(|err| {
                AppError::Validation(format!("Invalid transfer endpoint '{}': {}", endpoint, err))
            })?;
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_absolute(path: &Path, what: &str) -> Result<(), AppError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(AppError::Validation(format!("The {} must be absolute: {}", what, path.display())))
    }
}
