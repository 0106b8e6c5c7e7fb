//! Generate command implementation.

use std::path::PathBuf;

use clap::Args;

use super::prompt;
use crate::app::api;
use crate::app::config::ParamOverrides;
use crate::domain::{AppError, SiteKind};

#[derive(Args)]
pub struct GenerateArgs {
    /// Site kind (see `sitecat sites`)
    site: Option<String>,
    /// Parent directory for the scratch directories
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,
    /// Parent directory for the output storage directory
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,
    /// Parent of the scratch directory on the remote cluster
    #[arg(long, value_name = "DIR")]
    remote_scratch_dir: Option<PathBuf>,
    /// Project or allocation to charge jobs to
    #[arg(long)]
    project: Option<String>,
    /// Batch queue or partition
    #[arg(long)]
    queue: Option<String>,
    /// Pegasus installation on the execution site
    #[arg(long, value_name = "DIR")]
    pegasus_home: Option<String>,
    /// Login host of the remote cluster
    #[arg(long, value_name = "HOST")]
    login_host: Option<String>,
    /// URL prefix used to move files to the remote scratch directory
    #[arg(long, value_name = "URL")]
    transfer_endpoint: Option<String>,
    /// Defaults file to use instead of ./sitecat.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Catalog file to write
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    output: Option<PathBuf>,
    /// Print the catalog instead of writing it
    #[arg(long)]
    stdout: bool,
    /// Never prompt; fail when a value is missing
    #[arg(long)]
    no_input: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            scratch_dir: self.scratch_dir.clone(),
            storage_dir: self.storage_dir.clone(),
            remote_scratch_dir: self.remote_scratch_dir.clone(),
            project: self.project.clone(),
            queue: self.queue.clone(),
            pegasus_home: self.pegasus_home.clone(),
            login_host: self.login_host.clone(),
            transfer_endpoint: self.transfer_endpoint.clone(),
        }
    }
}

pub fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let root = std::env::current_dir()?;
    let interactive = !args.no_input && prompt::is_interactive();
    let defaults = api::load_defaults_at(&root, args.config.as_deref())?;

    let from_defaults = api::default_site(&defaults)?;
    let Some(kind) = resolve_site(args.site.as_deref(), from_defaults, interactive)? else {
        return Ok(());
    };

    let overrides = args.overrides();
    let mut request = api::request_at(&root, kind, &overrides, &defaults, args.output, args.stdout);
    if interactive {
        for param in request.params.missing(kind) {
            let Some(value) = prompt::param_value(kind, param)? else {
                return Ok(());
            };
            request.params = request.params.with_param(param, value);
        }
    }

    let outcome = api::execute_at(root, request)?;
    match &outcome.output {
        Some(path) => {
            println!("✅ Wrote {} catalog to {}", outcome.site_name, path.display());
        }
        None => print!("{}", outcome.yaml),
    }
    Ok(())
}

fn resolve_site(
    named: Option<&str>,
    from_defaults: Option<SiteKind>,
    interactive: bool,
) -> Result<Option<SiteKind>, AppError> {
    if let Some(name) = named {
        return name.parse().map(Some);
    }
    if let Some(kind) = from_defaults {
        return Ok(Some(kind));
    }
    if interactive {
        return prompt::select_site();
    }
    Err(AppError::Validation(
        "No site given: pass SITE or set site.site in sitecat.toml".to_string(),
    ))
}
