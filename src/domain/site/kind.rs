use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;
use crate::domain::catalog::Scheduler;

/// Execution environments a catalog can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteKind {
    /// HTCondor pool on the submit host.
    CondorPool,
    /// SLURM cluster reachable through the local filesystem.
    Slurm,
    /// SLURM cluster reached over SSH with a separate scratch filesystem.
    RemoteSlurm,
    /// LSF cluster reachable through the local filesystem.
    Lsf,
    /// Sun/Univa Grid Engine cluster reachable through the local filesystem.
    Sge,
    /// Summit, jobs submitted directly through LSF via glite.
    SummitGlite,
    /// Summit, jobs submitted over SSH from a pod on the Kubernetes cluster.
    SummitKubernetes,
    /// USC HPCC SLURM cluster.
    UscHpcc,
    /// OSG pool fronted by the ISI submit host.
    OsgIsi,
}

impl SiteKind {
    /// All site kinds in menu order.
    pub const ALL: [SiteKind; 9] = [
        SiteKind::CondorPool,
        SiteKind::Slurm,
        SiteKind::RemoteSlurm,
        SiteKind::Lsf,
        SiteKind::Sge,
        SiteKind::SummitGlite,
        SiteKind::SummitKubernetes,
        SiteKind::UscHpcc,
        SiteKind::OsgIsi,
    ];

    /// Selector used on the command line and in config files.
    pub fn cli_name(self) -> &'static str {
        match self {
            SiteKind::CondorPool => "condorpool",
            SiteKind::Slurm => "slurm",
            SiteKind::RemoteSlurm => "remote-slurm",
            SiteKind::Lsf => "lsf",
            SiteKind::Sge => "sge",
            SiteKind::SummitGlite => "summit-glite",
            SiteKind::SummitKubernetes => "summit-kubernetes",
            SiteKind::UscHpcc => "usc-hpcc",
            SiteKind::OsgIsi => "osg-isi",
        }
    }

    /// Name of the execution site record in the generated catalog.
    pub fn site_name(self) -> &'static str {
        match self {
            SiteKind::CondorPool => "condorpool",
            SiteKind::Slurm | SiteKind::RemoteSlurm => "slurm",
            SiteKind::Lsf => "lsf",
            SiteKind::Sge => "sge",
            SiteKind::SummitGlite | SiteKind::SummitKubernetes => "summit",
            SiteKind::UscHpcc => "usc-hpcc",
            SiteKind::OsgIsi => "osg-isi",
        }
    }

    /// Batch scheduler family behind the site, if it is not an HTCondor pool.
    pub fn scheduler(self) -> Option<Scheduler> {
        match self {
            SiteKind::CondorPool | SiteKind::OsgIsi => None,
            SiteKind::Slurm | SiteKind::RemoteSlurm | SiteKind::UscHpcc => Some(Scheduler::Slurm),
            SiteKind::Lsf | SiteKind::SummitGlite | SiteKind::SummitKubernetes => {
                Some(Scheduler::Lsf)
            }
            SiteKind::Sge => Some(Scheduler::Sge),
        }
    }

    /// One-line description shown in menus and `sitecat sites`.
    pub fn description(self) -> &'static str {
        match self {
            SiteKind::CondorPool => "Local HTCondor pool",
            SiteKind::Slurm => "SLURM cluster sharing the submit host filesystem",
            SiteKind::RemoteSlurm => "Remote SLURM cluster reached over SSH",
            SiteKind::Lsf => "LSF cluster sharing the submit host filesystem",
            SiteKind::Sge => "SGE cluster sharing the submit host filesystem",
            SiteKind::SummitGlite => "OLCF Summit, direct LSF submission",
            SiteKind::SummitKubernetes => "OLCF Summit, submission from a Kubernetes pod",
            SiteKind::UscHpcc => "USC HPCC SLURM cluster",
            SiteKind::OsgIsi => "Open Science Grid via the ISI submit host",
        }
    }

    /// Parse a site kind from its CLI name.
    pub fn from_cli_name(name: &str) -> Option<SiteKind> {
        let normalized = name.trim().to_lowercase().replace('_', "-");
        SiteKind::ALL.into_iter().find(|kind| kind.cli_name() == normalized)
    }

    fn available() -> String {
        SiteKind::ALL.iter().map(|kind| kind.cli_name()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for SiteKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteKind::from_cli_name(s).ok_or_else(|| AppError::InvalidSiteKind {
            name: s.to_string(),
            available: SiteKind::available(),
        })
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}
