//! Shared test utilities for CLI end-to-end tests.
//!
//! The fixture owns a temporary directory holding a root for working copies,
//! an empty config file and a `bin/` directory that can be filled with fake
//! VCS tools. A fake tool appends `<working dir>|<arguments>` to a log file
//! and, when asked to clone, creates the target directory with the marker the
//! real tool would leave behind.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_fake_tool("git", ".git");
//! fixture.command().args(["get", "owner/name"]).assert().success();
//! assert_eq!(fixture.invocations().len(), 1);
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::Invocation;
    pub use super::TestFixture;
}

/// One recorded call to a fake tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub dir: PathBuf,
    pub args: Vec<String>,
}

pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with an empty root and an empty config file.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("root")
            .create_dir_all()
            .expect("Failed to create root");
        temp_dir
            .child("bin")
            .create_dir_all()
            .expect("Failed to create bin");
        temp_dir
            .child("config.yaml")
            .write_str("")
            .expect("Failed to write config file");
        Self { temp_dir }
    }

    /// Replace the config file content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Install a fake `program` that records its calls and, on `clone` or
    /// `checkout`, creates `<last arg>/<marker>`. It exits with
    /// `$FAKE_VCS_EXIT` (default 0).
    #[cfg(unix)]
    pub fn with_fake_tool(self, program: &str, marker: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            r#"#!/bin/sh
echo "$(pwd)|$*" >> "{log}"
case "$1 $2" in
  clone*|checkout*|"svn clone")
    for last; do :; done
    mkdir -p "$last/{marker}"
    ;;
esac
exit "${{FAKE_VCS_EXIT:-0}}"
"#,
            log = self.log_path().display(),
            marker = marker,
        );
        let tool = self.bin_dir().join(program);
        std::fs::write(&tool, script).expect("Failed to write fake tool");
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake tool executable");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.path().join("root")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("invocations.log")
    }

    /// Calls recorded by fake tools, oldest first.
    pub fn invocations(&self) -> Vec<Invocation> {
        let Ok(log) = std::fs::read_to_string(self.log_path()) else {
            return Vec::new();
        };
        log.lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(dir, args)| Invocation {
                dir: PathBuf::from(dir),
                args: args.split_whitespace().map(str::to_string).collect(),
            })
            .collect()
    }

    /// A `ghq` command isolated from the user's environment: fake tools
    /// first on `PATH`, the fixture's config file, and no `GHQ_ROOT`.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ghq");
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![self.bin_dir()];
        paths.extend(std::env::split_paths(&path));
        cmd.current_dir(self.path())
            .env("PATH", std::env::join_paths(paths).expect("valid PATH"))
            .env("GHQ_CONFIG", self.config_path())
            .env_remove("GHQ_ROOT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Like [`TestFixture::command`], but `PATH` holds only the fake tools.
    pub fn command_with_only_fake_tools(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.env("PATH", self.bin_dir());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
