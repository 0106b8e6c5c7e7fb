//! Catalog builder: maps a site kind and its parameters onto catalog records.
//!
//! Every function here is pure. Parameters are assumed to have passed
//! [`SiteParams::validate`]; missing optional values simply leave entries out.

use std::path::Path;

use url::Url;

use crate::domain::params::{LOCAL_FILE_ENDPOINT, SiteParams};
use crate::domain::site::SiteKind;

use super::{
    Arch, CatalogDocument, Directory, DirectoryType, FileServer, GridDescriptor, JobType,
    LOCAL_SITE, Namespace, Operation, Profiles, Scheduler, SiteRecord,
};

/// HTCondor expression removing jobs held for more than ten seconds.
pub const HELD_JOB_REMOVAL: &str =
    "(JobStatus == 5) && ((CurrentTime - EnteredCurrentStatus) > 10)";

const DEFAULT_NODES: i64 = 1;
const DEFAULT_PPN: i64 = 1;
const DEFAULT_RUNTIME: i64 = 1800;
const CLUSTERS_NUM: i64 = 2;

const SUMMIT_ARCH: Arch = Arch::Ppc64le;
const SUMMIT_QUEUE: &str = "batch";
const SUMMIT_PEGASUS_HOME: &str = "/ccs/proj/csc355/summit/pegasus/stable";
const SUMMIT_CONTACT: &str = "${USER}@dtn.ccs.ornl.gov";

const USC_HPCC_QUEUE: &str = "quick";
const USC_HPCC_PEGASUS_HOME: &str = "/home/rcf-proj/gmj/pegasus/SOFTWARE/pegasus/default";

const OSG_REQUIREMENTS: &str =
    "OSGVO_OS_STRING == \"RHEL 6\" && Arch == \"X86_64\" &&  HAS_MODULES == True";
const OSG_PROJECT_NAME: &str = "PegasusTraining";

type Strategy = fn(SiteKind, &SiteParams) -> SiteRecord;

fn strategy(kind: SiteKind) -> Strategy {
    match kind {
        SiteKind::CondorPool => condor_pool,
        SiteKind::Slurm | SiteKind::Lsf | SiteKind::Sge => local_batch,
        SiteKind::RemoteSlurm => remote_slurm,
        SiteKind::SummitGlite => summit_glite,
        SiteKind::SummitKubernetes => summit_kubernetes,
        SiteKind::UscHpcc => usc_hpcc,
        SiteKind::OsgIsi => osg_isi,
    }
}

/// Build the catalog for `kind`: the `local` record followed by the execution site.
pub fn build(kind: SiteKind, params: &SiteParams) -> CatalogDocument {
    let execution = strategy(kind)(kind, params);
    CatalogDocument::local_and(local_site(params), execution)
}

/// Whether auxiliary jobs run on the submit host for the given transfer endpoint.
pub fn auxiliary_runs_locally(endpoint: &str) -> bool {
    let endpoint = endpoint.trim();
    endpoint.eq_ignore_ascii_case(LOCAL_FILE_ENDPOINT)
        || Url::parse(endpoint).is_ok_and(|url| url.scheme() == "file")
}

fn local_site(params: &SiteParams) -> SiteRecord {
    SiteRecord::new(LOCAL_SITE).with_directories([
        Directory::local(DirectoryType::SharedScratch, join(&params.scratch_parent, &["scratch"])),
        Directory::local(DirectoryType::LocalStorage, join(&params.storage_parent, &["output"])),
    ])
}

fn site_scratch(kind: SiteKind, parent: &Path) -> String {
    join(parent, &[kind.site_name(), "scratch"])
}

fn local_site_scratch(kind: SiteKind, params: &SiteParams) -> Directory {
    Directory::local(DirectoryType::SharedScratch, site_scratch(kind, &params.scratch_parent))
}

fn condor_pool_profiles() -> Profiles {
    Profiles::new()
        .pegasus("style", "condor")
        .pegasus("data.configuration", "condorio")
        .pegasus("clusters.num", CLUSTERS_NUM)
        .condor("universe", "vanilla")
        .condor("periodic_remove", HELD_JOB_REMOVAL)
}

fn condor_pool(kind: SiteKind, _params: &SiteParams) -> SiteRecord {
    SiteRecord::new(kind.site_name()).with_profiles(condor_pool_profiles())
}

fn osg_isi(kind: SiteKind, _params: &SiteParams) -> SiteRecord {
    let profiles = condor_pool_profiles()
        .condor("requirements", OSG_REQUIREMENTS)
        .condor("+ProjectName", OSG_PROJECT_NAME);
    SiteRecord::new(kind.site_name()).with_profiles(profiles)
}

fn grid_resource(kind: SiteKind) -> Profiles {
    match kind.scheduler() {
        Some(scheduler) => {
            Profiles::new().condor("grid_resource", format!("batch {}", scheduler.as_str()))
        }
        None => Profiles::new(),
    }
}

/// Profiles shared by batch clusters that see the submit host filesystem.
fn batch_profiles(kind: SiteKind, params: &SiteParams) -> Profiles {
    grid_resource(kind)
        .pegasus("style", "glite")
        .with_opt(Namespace::Pegasus, "queue", params.queue())
        .pegasus("data.configuration", "sharedfs")
        .pegasus("auxillary.local", true)
        .pegasus("nodes", DEFAULT_NODES)
        .pegasus("ppn", DEFAULT_PPN)
        .with_opt(Namespace::Pegasus, "project", params.project())
        .pegasus("runtime", DEFAULT_RUNTIME)
        .pegasus("clusters.num", CLUSTERS_NUM)
        .with_opt(Namespace::Env, "PEGASUS_HOME", params.pegasus_home())
}

fn local_batch(kind: SiteKind, params: &SiteParams) -> SiteRecord {
    SiteRecord::new(kind.site_name())
        .with_directories([local_site_scratch(kind, params)])
        .with_profiles(batch_profiles(kind, params))
}

fn remote_slurm(kind: SiteKind, params: &SiteParams) -> SiteRecord {
    let parent = params.remote_scratch_parent().unwrap_or(params.scratch_parent.as_path());
    let path = site_scratch(kind, parent);
    let endpoint = params.transfer_endpoint();
    let server = FileServer::new(endpoint_url(endpoint, &path), Operation::All);
    let contact = params.login_host().unwrap_or_default();

    SiteRecord::new(kind.site_name())
        .with_directories([Directory::new(DirectoryType::SharedScratch, path, server)])
        .with_grids(batch_grids(Scheduler::Slurm, contact))
        .with_profiles(
            batch_profiles(kind, params)
                .pegasus("auxillary.local", auxiliary_runs_locally(endpoint)),
        )
}

fn summit_profiles(params: &SiteParams) -> Profiles {
    Profiles::new()
        .pegasus("queue", SUMMIT_QUEUE)
        .pegasus("auxillary.local", true)
        .pegasus("nodes", DEFAULT_NODES)
        .with_opt(Namespace::Pegasus, "project", params.project())
        .pegasus("job.aggregator", "mpiexec")
        .pegasus("runtime", DEFAULT_RUNTIME)
        .pegasus("clusters.num", CLUSTERS_NUM)
        .env("PEGASUS_HOME", SUMMIT_PEGASUS_HOME)
}

fn summit_glite(kind: SiteKind, params: &SiteParams) -> SiteRecord {
    let profiles = grid_resource(kind)
        .pegasus("style", "glite")
        .pegasus("data.configuration", "sharedfs")
        .merge(summit_profiles(params));

    SiteRecord::new(kind.site_name())
        .with_arch(SUMMIT_ARCH)
        .with_directories([local_site_scratch(kind, params)])
        .with_profiles(profiles)
}

fn summit_kubernetes(kind: SiteKind, params: &SiteParams) -> SiteRecord {
    let profiles = Profiles::new()
        .pegasus("style", "ssh")
        .pegasus("change.dir", true)
        .merge(summit_profiles(params));

    SiteRecord::new(kind.site_name())
        .with_arch(SUMMIT_ARCH)
        .with_grids(batch_grids(Scheduler::Lsf, SUMMIT_CONTACT))
        .with_directories([local_site_scratch(kind, params)])
        .with_profiles(profiles)
}

fn usc_hpcc(kind: SiteKind, params: &SiteParams) -> SiteRecord {
    let profiles = grid_resource(kind)
        .pegasus("style", "glite")
        .pegasus("queue", USC_HPCC_QUEUE)
        .pegasus("data.configuration", "sharedfs")
        .pegasus("auxillary.local", true)
        .pegasus("clusters.num", CLUSTERS_NUM)
        .pegasus("job.aggregator", "mpiexec")
        .env("PEGASUS_HOME", USC_HPCC_PEGASUS_HOME);

    SiteRecord::new(kind.site_name())
        .with_directories([local_site_scratch(kind, params)])
        .with_profiles(profiles)
}

fn batch_grids(scheduler: Scheduler, contact: &str) -> [GridDescriptor; 2] {
    [
        GridDescriptor::batch(scheduler, contact, JobType::Compute),
        GridDescriptor::batch(scheduler, contact, JobType::Auxillary),
    ]
}

fn endpoint_url(endpoint: &str, path: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.ends_with("://") {
        format!("{}{}", endpoint, path)
    } else {
        format!("{}{}", endpoint.strip_suffix('/').unwrap_or(endpoint), path)
    }
}

fn join(parent: &Path, parts: &[&str]) -> String {
    parts.iter().fold(parent.to_path_buf(), |path, part| path.join(part)).display().to_string()
}
