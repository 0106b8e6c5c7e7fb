use serial_test::serial;
use sitecat::app::api;
use sitecat::{
    AppError, DirectoryType, GenerateOptions, Namespace, ParamOverrides, ProfileValue, SiteKind,
    SiteParams,
};
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn build_render_parse_round_trip() {
    let params = SiteParams { queue: Some("q1".into()), ..SiteParams::new("/s", "/o") };
    let doc = sitecat::build_checked(SiteKind::Slurm, &params).unwrap();
    let yaml = sitecat::render(&doc).unwrap();
    assert_eq!(sitecat::parse(&yaml).unwrap(), doc);

    let local = doc.site("local").unwrap();
    assert_eq!(local.directory(DirectoryType::LocalStorage).unwrap().path(), "/o/output");
}

#[test]
fn build_checked_rejects_missing_project_for_summit() {
    let err = sitecat::build_checked(SiteKind::SummitGlite, &SiteParams::new("/s", "/o"))
        .unwrap_err();
    assert!(matches!(err, AppError::MissingParameter { .. }));
}

#[test]
fn site_kinds_are_in_registry_order() {
    let names: Vec<_> = sitecat::site_kinds().iter().map(|kind| kind.cli_name()).collect();
    assert_eq!(names.first(), Some(&"condorpool"));
    assert!(names.contains(&"remote-slurm"));
    assert_eq!(names.len(), 9);
}

#[test]
fn generate_at_writes_under_root() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        site: Some(SiteKind::Sge),
        overrides: ParamOverrides {
            queue: Some("all.q".into()),
            scratch_dir: Some(PathBuf::from("scratch")),
            ..ParamOverrides::default()
        },
        output: Some(PathBuf::from("out/sge.yml")),
        ..GenerateOptions::default()
    };

    let outcome = api::generate_at(dir.path(), options).unwrap();
    assert_eq!(outcome.site_name, "sge");

    let written = fs::read_to_string(dir.path().join("out/sge.yml")).unwrap();
    assert_eq!(written, outcome.yaml);
    let doc = sitecat::parse(&written).unwrap();
    let scratch = doc.site("sge").unwrap().directory(DirectoryType::SharedScratch).unwrap();
    assert_eq!(scratch.path(), dir.path().join("scratch/sge/scratch").display().to_string());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        site: Some(SiteKind::CondorPool),
        dry_run: true,
        ..GenerateOptions::default()
    };
    let outcome = api::generate_at(dir.path(), options).unwrap();
    assert!(outcome.output.is_none());
    assert!(!dir.path().join("sites.yml").exists());
}

#[test]
fn generate_without_site_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = api::generate_at(dir.path(), GenerateOptions::default()).unwrap_err();
    assert!(err.to_string().contains("No site given"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        site: Some(SiteKind::CondorPool),
        config: Some(PathBuf::from("missing.toml")),
        ..GenerateOptions::default()
    };
    let err = api::generate_at(dir.path(), options).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
#[serial]
fn environment_defaults_apply_to_accepting_sites() {
    let dir = TempDir::new().unwrap();
    unsafe {
        env::set_var("LSB_DEFAULTQUEUE", "night");
        env::set_var("LSB_DEFAULTPROJECT", "bio42");
    }

    let lsf = api::generate_at(
        dir.path(),
        GenerateOptions { site: Some(SiteKind::Lsf), dry_run: true, ..Default::default() },
    );
    let summit = api::generate_at(
        dir.path(),
        GenerateOptions {
            site: Some(SiteKind::SummitKubernetes),
            dry_run: true,
            ..Default::default()
        },
    );

    unsafe {
        env::remove_var("LSB_DEFAULTQUEUE");
        env::remove_var("LSB_DEFAULTPROJECT");
    }

    let doc = sitecat::parse(&lsf.unwrap().yaml).unwrap();
    let site = doc.site("lsf").unwrap();
    assert_eq!(site.profiles.get(Namespace::Pegasus, "queue"), Some(&ProfileValue::from("night")));
    assert_eq!(
        site.profiles.get(Namespace::Pegasus, "project"),
        Some(&ProfileValue::from("bio42"))
    );

    let doc = sitecat::parse(&summit.unwrap().yaml).unwrap();
    let site = doc.site("summit").unwrap();
    assert_eq!(site.profiles.get(Namespace::Pegasus, "queue"), Some(&ProfileValue::from("batch")));
    assert_eq!(
        site.profiles.get(Namespace::Pegasus, "project"),
        Some(&ProfileValue::from("bio42"))
    );
}

#[test]
fn show_at_reads_generated_catalog() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions { site: Some(SiteKind::UscHpcc), ..Default::default() };
    api::generate_at(dir.path(), options).unwrap();

    let doc = api::show_at(dir.path(), std::path::Path::new("sites.yml")).unwrap();
    assert!(doc.site("usc-hpcc").is_some());
}
