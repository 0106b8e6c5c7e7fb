//! Parameter defaults: `sitecat.toml` and environment variables.
//!
//! Explicit flags always reach validation. Values from the defaults file or the
//! environment are only applied when the chosen site accepts them, so a project set
//! for the batch sites does not make a Condor pool invalid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::domain::site::{PEGASUS_HOME_ENV, ProjectRequirement};
use crate::domain::{AppError, SiteKind, SiteParams};

/// Defaults file picked up from the working directory when present.
pub const DEFAULTS_FILE: &str = "sitecat.toml";

/// Catalog file written when no output is given.
pub const DEFAULT_OUTPUT: &str = "sites.yml";

/// Contents of a `sitecat.toml` defaults file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDefaults {
    #[serde(default)]
    pub paths: PathDefaults,
    #[serde(default)]
    pub site: SiteSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathDefaults {
    pub scratch_dir: Option<PathBuf>,
    pub storage_dir: Option<PathBuf>,
    pub remote_scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSettings {
    pub site: Option<String>,
    pub project: Option<String>,
    pub queue: Option<String>,
    pub pegasus_home: Option<String>,
    pub login_host: Option<String>,
    pub transfer_endpoint: Option<String>,
    pub output: Option<PathBuf>,
}

impl SiteDefaults {
    pub fn validate(&self) -> Result<(), AppError> {
        let paths = [
            ("scratch_dir", &self.paths.scratch_dir),
            ("storage_dir", &self.paths.storage_dir),
            ("remote_scratch_dir", &self.paths.remote_scratch_dir),
        ];
        for (name, path) in paths {
            if let Some(path) = path.as_ref().filter(|path| !path.is_absolute()) {
                return Err(AppError::InvalidConfig(format!(
                    "paths.{} must be absolute: {}",
                    name,
                    path.display()
                )));
            }
        }

        if let Some(site) = &self.site.site {
            site.parse::<SiteKind>()?;
        }

        if let Some(endpoint) = &self.site.transfer_endpoint {
            Url::parse(endpoint).map_err(|err| {
                AppError::InvalidConfig(format!(
                    "site.transfer_endpoint '{}' is not a URL: {}",
                    endpoint, err
                ))
            })?;
        }
        Ok(())
    }
}

/// Parse defaults from TOML content.
pub fn parse_defaults(content: &str) -> Result<SiteDefaults, AppError> {
    let defaults: SiteDefaults = toml::from_str(content)?;
    defaults.validate()?;
    Ok(defaults)
}

/// Load defaults from `explicit`, or from `root/sitecat.toml` if it exists.
pub fn load_defaults(root: &Path, explicit: Option<&Path>) -> Result<SiteDefaults, AppError> {
    let path = match explicit {
        Some(path) => root.join(path),
        None => {
            let implicit = root.join(DEFAULTS_FILE);
            if !implicit.is_file() {
                return Ok(SiteDefaults::default());
            }
            implicit
        }
    };

    tracing::debug!(path = %path.display(), "loading defaults file");
    let content = fs::read_to_string(&path)?;
    parse_defaults(&content)
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamOverrides {
    pub scratch_dir: Option<PathBuf>,
    pub storage_dir: Option<PathBuf>,
    pub remote_scratch_dir: Option<PathBuf>,
    pub project: Option<String>,
    pub queue: Option<String>,
    pub pegasus_home: Option<String>,
    pub login_host: Option<String>,
    pub transfer_endpoint: Option<String>,
}

/// Merge flags, the defaults file and the environment into site parameters.
///
/// Relative scratch and storage directories resolve against `cwd`, which is also their
/// fallback. The remote scratch directory is passed through as given.
pub fn resolve_params(
    kind: SiteKind,
    overrides: &ParamOverrides,
    defaults: &SiteDefaults,
    env: impl Fn(&str) -> Option<String>,
    cwd: &Path,
) -> SiteParams {
    let reqs = kind.requirements();
    let from_env = |var: Option<&'static str>| {
        let var = var?;
        let value = env(var).filter(|value| !value.trim().is_empty())?;
        tracing::debug!(var, site = %kind, "using environment default");
        Some(value)
    };

    let queue = overrides.queue.clone().or_else(|| {
        if !reqs.queue.is_accepted() {
            return None;
        }
        defaults.site.queue.clone().or_else(|| from_env(reqs.queue_env))
    });

    let project = overrides.project.clone().or_else(|| {
        if reqs.project == ProjectRequirement::Forbidden {
            return None;
        }
        defaults.site.project.clone().or_else(|| from_env(reqs.project_env))
    });

    let pegasus_home = overrides.pegasus_home.clone().or_else(|| {
        if !reqs.pegasus_home.is_accepted() {
            return None;
        }
        defaults.site.pegasus_home.clone().or_else(|| from_env(Some(PEGASUS_HOME_ENV)))
    });

    let login_host = overrides
        .login_host
        .clone()
        .or_else(|| reqs.login_host.is_accepted().then(|| defaults.site.login_host.clone())?);

    let transfer_endpoint = overrides
        .transfer_endpoint
        .clone()
        .or_else(|| reqs.remote.then(|| defaults.site.transfer_endpoint.clone())?);

    let remote_scratch_parent = overrides
        .remote_scratch_dir
        .clone()
        .or_else(|| {
            reqs.remote_scratch.is_accepted().then(|| defaults.paths.remote_scratch_dir.clone())?
        });

    let scratch_parent = overrides
        .scratch_dir
        .clone()
        .or_else(|| defaults.paths.scratch_dir.clone())
        .map_or_else(|| cwd.to_path_buf(), |path| absolutize(cwd, path));

    let storage_parent = overrides
        .storage_dir
        .clone()
        .or_else(|| defaults.paths.storage_dir.clone())
        .map_or_else(|| cwd.to_path_buf(), |path| absolutize(cwd, path));

    SiteParams {
        scratch_parent,
        storage_parent,
        project,
        queue,
        pegasus_home,
        login_host,
        transfer_endpoint,
        remote_scratch_parent,
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { cwd.join(path) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn parses_full_defaults_file() {
        let defaults = parse_defaults(
            r#"
[paths]
scratch_dir = "/work/scratch"
storage_dir = "/work/out"
remote_scratch_dir = "/lustre/me"

[site]
site = "remote-slurm"
project = "abc123"
queue = "normal"
pegasus_home = "/opt/pegasus"
login_host = "login.cluster.org"
transfer_endpoint = "scp://me@login.cluster.org"
output = "conf/sites.yml"
"#,
        )
        .unwrap();
        assert_eq!(defaults.paths.scratch_dir, Some(PathBuf::from("/work/scratch")));
        assert_eq!(defaults.site.site.as_deref(), Some("remote-slurm"));
        assert_eq!(defaults.site.output, Some(PathBuf::from("conf/sites.yml")));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_defaults("[site]\nqueu = \"typo\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }

    #[test]
    fn rejects_relative_paths() {
        let err = parse_defaults("[paths]\nscratch_dir = \"scratch\"\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unknown_site() {
        let err = parse_defaults("[site]\nsite = \"pbs\"\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidSiteKind { .. }));
    }

    #[test]
    fn rejects_malformed_endpoint() {
        let err = parse_defaults("[site]\ntransfer_endpoint = \"nope\"\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn missing_implicit_file_yields_empty_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_defaults(dir.path(), None).unwrap(), SiteDefaults::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_defaults(dir.path(), Some(Path::new("absent.toml"))).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn implicit_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULTS_FILE), "[site]\nqueue = \"normal\"\n").unwrap();
        let defaults = load_defaults(dir.path(), None).unwrap();
        assert_eq!(defaults.site.queue.as_deref(), Some("normal"));
    }

    #[test]
    fn directories_default_to_cwd() {
        let params = resolve_params(
            SiteKind::CondorPool,
            &ParamOverrides::default(),
            &SiteDefaults::default(),
            no_env,
            Path::new("/home/me/run"),
        );
        assert_eq!(params.scratch_parent, PathBuf::from("/home/me/run"));
        assert_eq!(params.storage_parent, PathBuf::from("/home/me/run"));
    }

    #[test]
    fn flags_beat_file_beat_env() {
        let defaults = parse_defaults("[site]\nqueue = \"from-file\"\n").unwrap();
        let env = env_from(&[("SBATCH_PARTITION", "from-env"), ("SBATCH_ACCOUNT", "acct")]);

        let flagged = ParamOverrides { queue: Some("from-flag".into()), ..Default::default() };
        let params = resolve_params(SiteKind::Slurm, &flagged, &defaults, &env, Path::new("/w"));
        assert_eq!(params.queue(), Some("from-flag"));

        let params = resolve_params(
            SiteKind::Slurm,
            &ParamOverrides::default(),
            &defaults,
            &env,
            Path::new("/w"),
        );
        assert_eq!(params.queue(), Some("from-file"));
        assert_eq!(params.project(), Some("acct"));

        let params = resolve_params(
            SiteKind::Slurm,
            &ParamOverrides::default(),
            &SiteDefaults::default(),
            &env,
            Path::new("/w"),
        );
        assert_eq!(params.queue(), Some("from-env"));
    }

    #[test]
    fn defaults_do_not_leak_into_sites_that_reject_them() {
        let defaults = parse_defaults("[site]\nproject = \"abc\"\nqueue = \"normal\"\n").unwrap();
        let env = env_from(&[(PEGASUS_HOME_ENV, "/opt/pegasus")]);
        let params = resolve_params(
            SiteKind::CondorPool,
            &ParamOverrides::default(),
            &defaults,
            env,
            Path::new("/w"),
        );
        assert_eq!(params.project(), None);
        assert_eq!(params.queue(), None);
        assert_eq!(params.pegasus_home(), None);
        params.validate(SiteKind::CondorPool).unwrap();
    }

    #[test]
    fn scheduler_specific_environment() {
        let env = env_from(&[
            ("SBATCH_PARTITION", "slurm-q"),
            ("LSB_DEFAULTQUEUE", "lsf-q"),
            ("LSB_DEFAULTPROJECT", "lsf-p"),
        ]);
        let lsf = resolve_params(
            SiteKind::Lsf,
            &ParamOverrides::default(),
            &SiteDefaults::default(),
            &env,
            Path::new("/w"),
        );
        assert_eq!(lsf.queue(), Some("lsf-q"));
        assert_eq!(lsf.project(), Some("lsf-p"));

        let summit = resolve_params(
            SiteKind::SummitGlite,
            &ParamOverrides::default(),
            &SiteDefaults::default(),
            &env,
            Path::new("/w"),
        );
        assert_eq!(summit.project(), Some("lsf-p"));
        assert_eq!(summit.queue(), None);
    }

    #[test]
    fn relative_local_flags_resolve_against_cwd() {
        let overrides = ParamOverrides {
            scratch_dir: Some("scratch".into()),
            remote_scratch_dir: Some("remote".into()),
            queue: Some("normal".into()),
            pegasus_home: Some("/opt/pegasus".into()),
            login_host: Some("login".into()),
            ..Default::default()
        };
        let params = resolve_params(
            SiteKind::RemoteSlurm,
            &overrides,
            &SiteDefaults::default(),
            no_env,
            Path::new("/w"),
        );
        assert_eq!(params.scratch_parent, PathBuf::from("/w/scratch"));
        assert_eq!(params.remote_scratch_parent(), Some(Path::new("remote")));

        let err = params.validate(SiteKind::RemoteSlurm).unwrap_err();
        assert!(err.to_string().contains("remote scratch directory must be absolute"));
    }

    #[test]
    fn remote_settings_come_from_file_only_for_remote_sites() {
        let defaults = parse_defaults(
            "[site]\nlogin_host = \"login\"\ntransfer_endpoint = \"scp://login\"\n",
        )
        .unwrap();
        let remote = resolve_params(
            SiteKind::RemoteSlurm,
            &ParamOverrides::default(),
            &defaults,
            no_env,
            Path::new("/w"),
        );
        assert_eq!(remote.login_host(), Some("login"));
        assert_eq!(remote.transfer_endpoint(), "scp://login");

        let local = resolve_params(
            SiteKind::Slurm,
            &ParamOverrides::default(),
            &defaults,
            no_env,
            Path::new("/w"),
        );
        assert_eq!(local.login_host(), None);
        assert_eq!(local.transfer_endpoint(), "file://");
    }
}
