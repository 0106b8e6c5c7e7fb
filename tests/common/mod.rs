//! Shared testing utilities for sitecat CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would otherwise leak site defaults into a test.
const SITE_ENV: &[&str] = &[
    "SBATCH_PARTITION",
    "SBATCH_ACCOUNT",
    "LSB_DEFAULTQUEUE",
    "LSB_DEFAULTPROJECT",
    "SGE_QUEUE",
    "SGE_PROJECT",
    "PEGASUS_HOME",
    "RUST_LOG",
];

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the working directory for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `sitecat` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("sitecat").expect("Failed to locate sitecat binary");
        cmd.current_dir(&self.work_dir);
        for var in SITE_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Write `sitecat.toml` into the work directory.
    pub fn write_defaults(&self, content: &str) {
        fs::write(self.work_dir.join("sitecat.toml"), content)
            .expect("Failed to write defaults file");
    }

    /// Read a file relative to the work directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|err| panic!("Failed to read {}: {}", relative, err))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.work_dir.join(relative).exists()
    }

    /// Absolute form of the work directory as a string, for path assertions.
    pub fn work_str(&self) -> String {
        self.work_dir.display().to_string()
    }
}
