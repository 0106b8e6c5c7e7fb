//! Pegasus 5.0 YAML rendering of the site catalog.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::domain::AppError;
use crate::domain::catalog::{
    Arch, CatalogDocument, Directory, DirectoryType, FileServer, GridDescriptor, GridType,
    JobType, Namespace, Operation, ProfileValue, Profiles, Scheduler, SiteRecord,
};

/// Catalog format version written to and accepted from disk.
pub const CATALOG_VERSION: &str = "5.0";

const WHAT: &str = "site catalog";

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    pegasus: Value,
    #[serde(default)]
    sites: Vec<SiteEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SiteEntry {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arch: Option<Arch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    directories: Vec<DirectoryEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    grids: Vec<GridEntry>,
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    profiles: Mapping,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryEntry {
    #[serde(rename = "type")]
    directory_type: DirectoryType,
    path: String,
    #[serde(default)]
    shared_file_system: bool,
    file_servers: Vec<FileServerEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FileServerEntry {
    url: String,
    operation: Operation,
}

#[derive(Debug, Serialize, Deserialize)]
struct GridEntry {
    #[serde(rename = "type")]
    grid_type: GridType,
    contact: String,
    scheduler: Scheduler,
    jobtype: JobType,
}

/// Render a catalog document as Pegasus YAML.
pub fn to_yaml(doc: &CatalogDocument) -> Result<String, AppError> {
    let file = CatalogFile {
        pegasus: Value::String(CATALOG_VERSION.to_string()),
        sites: doc.sites().iter().map(site_entry).collect::<Result<_, _>>()?,
    };
    serde_yaml::to_string(&file).map_err(|err| AppError::Serialization(err.to_string()))
}

/// Parse Pegasus YAML back into a catalog document.
pub fn from_yaml(content: &str) -> Result<CatalogDocument, AppError> {
    let file: CatalogFile =
        serde_yaml::from_str(content).map_err(|err| AppError::parse(WHAT, err))?;

    let version = match &file.pegasus {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        other => return Err(AppError::parse(WHAT, format!("unexpected version {:?}", other))),
    };
    if version != CATALOG_VERSION {
        return Err(AppError::parse(
            WHAT,
            format!("unsupported version '{}', expected '{}'", version, CATALOG_VERSION),
        ));
    }

    let sites = file.sites.into_iter().map(site_record).collect::<Result<Vec<_>, _>>()?;
    CatalogDocument::new(sites).map_err(|err| AppError::parse(WHAT, err))
}

fn site_entry(site: &SiteRecord) -> Result<SiteEntry, AppError> {
    Ok(SiteEntry {
        name: site.name.clone(),
        arch: site.arch,
        directories: site.directories.iter().map(directory_entry).collect(),
        grids: site.grids.iter().map(grid_entry).collect(),
        profiles: profile_mapping(&site.profiles)?,
    })
}

fn directory_entry(dir: &Directory) -> DirectoryEntry {
    DirectoryEntry {
        directory_type: dir.directory_type(),
        path: dir.path().to_string(),
        shared_file_system: dir.shared_file_system(),
        file_servers: dir
            .file_servers()
            .iter()
            .map(|server| FileServerEntry { url: server.url.clone(), operation: server.operation })
            .collect(),
    }
}

fn grid_entry(grid: &GridDescriptor) -> GridEntry {
    GridEntry {
        grid_type: grid.grid_type,
        contact: grid.contact.clone(),
        scheduler: grid.scheduler,
        jobtype: grid.job_type,
    }
}

fn profile_mapping(profiles: &Profiles) -> Result<Mapping, AppError> {
    let mut mapping = Mapping::new();
    for namespace in profiles.namespaces() {
        let mut entries = Mapping::new();
        for entry in profiles.entries().iter().filter(|entry| entry.namespace == namespace) {
            let value = serde_yaml::to_value(&entry.value)
                .map_err(|err| AppError::Serialization(err.to_string()))?;
            entries.insert(Value::String(entry.key.clone()), value);
        }
        mapping.insert(Value::String(namespace.as_str().to_string()), Value::Mapping(entries));
    }
    Ok(mapping)
}

fn site_record(entry: SiteEntry) -> Result<SiteRecord, AppError> {
    let directories = entry
        .directories
        .into_iter()
        .map(|dir| {
            let servers = dir
                .file_servers
                .into_iter()
                .map(|server| FileServer::new(server.url, server.operation))
                .collect();
            Directory::from_parts(dir.directory_type, dir.path, dir.shared_file_system, servers)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let grids = entry.grids.into_iter().map(|grid| GridDescriptor {
        grid_type: grid.grid_type,
        contact: grid.contact,
        scheduler: grid.scheduler,
        job_type: grid.jobtype,
    });

    let record = SiteRecord::new(entry.name)
        .with_directories(directories)
        .with_grids(grids)
        .with_profiles(parse_profiles(entry.profiles)?);

    Ok(match entry.arch {
        Some(arch) => record.with_arch(arch),
        None => record,
    })
}

fn parse_profiles(mapping: Mapping) -> Result<Profiles, AppError> {
    let mut profiles = Profiles::new();
    for (namespace, entries) in mapping {
        let namespace: Namespace = serde_yaml::from_value(namespace)
            .map_err(|err| AppError::parse("profile namespace", err))?;
        let Value::Mapping(entries) = entries else {
            return Err(AppError::parse(
                "profiles",
                format!("namespace '{}' must map keys to values", namespace.as_str()),
            ));
        };
        for (key, value) in entries {
            let Value::String(key) = key else {
                return Err(AppError::parse("profiles", format!("non-string key {:?}", key)));
            };
            let value: ProfileValue = serde_yaml::from_value(value)
                .map_err(|err| AppError::parse(format!("profile '{}'", key), err))?;
            profiles = profiles.with(namespace, key, value);
        }
    }
    Ok(profiles)
}
