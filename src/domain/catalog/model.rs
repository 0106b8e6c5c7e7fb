//! Site catalog value records.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

use super::Profiles;

/// Name of the site record describing the submit host.
pub const LOCAL_SITE: &str = "local";

/// Role a directory plays on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryType {
    SharedScratch,
    SharedStorage,
    LocalScratch,
    LocalStorage,
}

/// Operations a file server permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read.
    Get,
    /// Write.
    Put,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileServer {
    pub url: String,
    pub operation: Operation,
}

impl FileServer {
    pub fn new(url: impl Into<String>, operation: Operation) -> Self {
        Self { url: url.into(), operation }
    }

    /// File server backed by the local filesystem at `path`.
    pub fn local(path: &str) -> Self {
        Self::new(format!("file://{}", path), Operation::All)
    }
}

/// A directory on a site. Always carries at least one file server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    directory_type: DirectoryType,
    path: String,
    shared_file_system: bool,
    file_servers: Vec<FileServer>,
}

impl Directory {
    pub fn new(directory_type: DirectoryType, path: impl Into<String>, server: FileServer) -> Self {
        Self {
            directory_type,
            path: path.into(),
            shared_file_system: false,
            file_servers: vec![server],
        }
    }

    /// Directory served from the local filesystem at its own path.
    pub fn local(directory_type: DirectoryType, path: impl Into<String>) -> Self {
        let path = path.into();
        let server = FileServer::local(&path);
        Self::new(directory_type, path, server)
    }

    pub fn directory_type(&self) -> DirectoryType {
        self.directory_type
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn shared_file_system(&self) -> bool {
        self.shared_file_system
    }

    pub fn file_servers(&self) -> &[FileServer] {
        &self.file_servers
    }

    /// Rebuild a directory from parsed parts, enforcing the file server invariant.
    pub(crate) fn from_parts(
        directory_type: DirectoryType,
        path: String,
        shared_file_system: bool,
        file_servers: Vec<FileServer>,
    ) -> Result<Self, AppError> {
        if file_servers.is_empty() {
            return Err(AppError::parse(
                "site catalog",
                format!("directory '{}' has no file servers", path),
            ));
        }
        Ok(Self { directory_type, path, shared_file_system, file_servers })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    Batch,
    Condor,
    Gt5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheduler {
    Fork,
    Pbs,
    Lsf,
    Condor,
    Sge,
    Slurm,
}

impl Scheduler {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheduler::Fork => "fork",
            Scheduler::Pbs => "pbs",
            Scheduler::Lsf => "lsf",
            Scheduler::Condor => "condor",
            Scheduler::Sge => "sge",
            Scheduler::Slurm => "slurm",
        }
    }
}

/// Job category a grid accepts. Spelling follows the catalog format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Compute,
    Auxillary,
    Transfer,
    Register,
    Cleanup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDescriptor {
    pub grid_type: GridType,
    pub contact: String,
    pub scheduler: Scheduler,
    pub job_type: JobType,
}

impl GridDescriptor {
    pub fn batch(scheduler: Scheduler, contact: impl Into<String>, job_type: JobType) -> Self {
        Self { grid_type: GridType::Batch, contact: contact.into(), scheduler, job_type }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "ppc64le")]
    Ppc64le,
    #[serde(rename = "aarch64")]
    Aarch64,
}

/// One site in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub name: String,
    pub arch: Option<Arch>,
    pub directories: Vec<Directory>,
    pub grids: Vec<GridDescriptor>,
    pub profiles: Profiles,
}

impl SiteRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arch: None,
            directories: Vec::new(),
            grids: Vec::new(),
            profiles: Profiles::default(),
        }
    }

    pub fn with_arch(self, arch: Arch) -> Self {
        Self { arch: Some(arch), ..self }
    }

    pub fn with_directories(self, directories: impl IntoIterator<Item = Directory>) -> Self {
        let mut record = self;
        record.directories.extend(directories);
        record
    }

    pub fn with_grids(self, grids: impl IntoIterator<Item = GridDescriptor>) -> Self {
        let mut record = self;
        record.grids.extend(grids);
        record
    }

    pub fn with_profiles(self, profiles: Profiles) -> Self {
        Self { profiles: self.profiles.merge(profiles), ..self }
    }

    pub fn directory(&self, directory_type: DirectoryType) -> Option<&Directory> {
        self.directories.iter().find(|dir| dir.directory_type() == directory_type)
    }
}

/// Ordered set of site records with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDocument {
    sites: Vec<SiteRecord>,
}

impl CatalogDocument {
    pub fn new(sites: Vec<SiteRecord>) -> Result<Self, AppError> {
        for (index, site) in sites.iter().enumerate() {
            if sites[..index].iter().any(|earlier| earlier.name == site.name) {
                return Err(AppError::Validation(format!(
                    "Duplicate site name '{}' in catalog",
                    site.name
                )));
            }
        }
        Ok(Self { sites })
    }

    /// Local record followed by an execution record whose name differs from it.
    pub(crate) fn local_and(local: SiteRecord, execution: SiteRecord) -> Self {
        debug_assert_ne!(local.name, execution.name);
        Self { sites: vec![local, execution] }
    }

    pub fn sites(&self) -> &[SiteRecord] {
        &self.sites
    }

    pub fn site(&self, name: &str) -> Option<&SiteRecord> {
        self.sites.iter().find(|site| site.name == name)
    }
}
