//! Functional test harness for spectrumctl
//!
//! Every test gets its own temporary directory holding the declaration and
//! state files, so tests can run in parallel.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

#[allow(unused_imports)]
use assert_cmd::prelude::*;
use tempfile::TempDir;

pub mod lifecycle_tests;

/// Prefix for test hostnames to identify leftovers
pub const TEST_RESOURCE_PREFIX: &str = "spectrumctl-functest";

/// Context for functional tests: credentials from the environment plus an
/// isolated working directory.
pub struct FunctionalTestContext {
    pub zone_id: String,
    pub domain: String,
    pub dir: TempDir,
}

impl FunctionalTestContext {
    /// Panics with a clear message when the live environment is not configured.
    pub fn new() -> Self {
        for var in ["CLOUDFLARE_API_TOKEN", "CLOUDFLARE_ZONE_ID", "CLOUDFLARE_DOMAIN"] {
            if env::var(var).map(|v| v.is_empty()).unwrap_or(true) {
                panic!("{var} must be set for functional tests");
            }
        }

        Self {
            zone_id: env::var("CLOUDFLARE_ZONE_ID").unwrap(),
            domain: env::var("CLOUDFLARE_DOMAIN").unwrap(),
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("spectrum_app.state.json")
    }

    /// Write the declaration used by `create` and `update`
    pub fn declare(&self, hostname: &str, origin: &str) {
        let contents = format!(
            "zone_id: {zone}\nprotocol: tcp/22\ndns:\n  type: CNAME\n  name: {hostname}\norigin_direct:\n  - {origin}\n",
            zone = self.zone_id,
        );
        fs::write(self.dir.path().join("spectrum_app.yaml"), contents)
            .expect("failed to write declaration");
    }

    /// Build a Command running in the test directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("spectrumctl"));
        cmd.current_dir(self.dir.path())
            .arg("--config")
            .arg(self.dir.path().join("config.yaml"))
            .args(args);
        cmd
    }

    /// Execute command and expect success, returning stdout as String.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "Command failed: spectrumctl {}\nstderr: {}",
                args.join(" "),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Current state file contents
    pub fn state(&self) -> serde_json::Value {
        let contents = fs::read_to_string(self.state_path()).expect("state file missing");
        serde_json::from_str(&contents).expect("state file is not JSON")
    }

    pub fn state_id(&self) -> String {
        self.state()["id"].as_str().unwrap_or_default().to_string()
    }
}

impl Default for FunctionalTestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FunctionalTestContext {
    /// Best-effort cleanup of whatever the state file still tracks
    fn drop(&mut self) {
        if self.state_path().exists() && !self.state_id().is_empty() {
            let _ = self.command(&["delete", "--yes"]).output();
        }
    }
}

/// Unique hostname in the test zone, e.g. `spectrumctl-functest-1706123456.example.com`
pub fn test_hostname(domain: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}.{}", TEST_RESOURCE_PREFIX, nanos, domain)
}
