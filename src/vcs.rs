//! # VCS Backends
//!
//! Each supported version control system is a variant of [`VcsBackend`]. All
//! four share one contract:
//!
//! - **clone**: make sure the parent directories of the local path exist, then
//!   run the tool's clone/checkout command with the remote URL and local path.
//! - **update**: run the tool's update command inside the local path.
//!
//! Callers always pass the full [`CloneOptions`] set. A backend that has no
//! use for an option ignores it, so the option never shows up in its command
//! line.
//!
//! | Backend    | Clone                      | branch | shallow     | recursive   | Update           |
//! |------------|----------------------------|--------|-------------|-------------|------------------|
//! | Git        | `git clone`                | yes    | `--depth 1` | `--recursive` | `git pull --ff-only` |
//! | Subversion | `svn checkout`             | no     | `--depth 1` | no          | `svn update`     |
//! | GitSvn     | `git svn clone`            | no     | no          | no          | `git svn rebase` |
//! | Mercurial  | `hg clone`                 | no     | no          | no          | `hg pull --update` |
//!
//! Flags are always emitted in the order branch, depth, recursive, and always
//! ahead of the positional remote and local arguments.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::process::CommandRunner;

/// Clone-time choices. Never consulted on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Branch to check out instead of the remote's default.
    pub branch: Option<String>,
    /// Fetch only the most recent history.
    pub shallow: bool,
    /// Also clone submodules.
    pub recursive: bool,
}

/// A version control tool integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsBackend {
    Git,
    Subversion,
    GitSvn,
    Mercurial,
}

impl VcsBackend {
    pub const ALL: [VcsBackend; 4] = [
        VcsBackend::Git,
        VcsBackend::Subversion,
        VcsBackend::GitSvn,
        VcsBackend::Mercurial,
    ];

    /// Canonical name, as accepted by `--vcs` and the config file.
    pub const fn as_key(self) -> &'static str {
        match self {
            VcsBackend::Git => "git",
            VcsBackend::Subversion => "svn",
            VcsBackend::GitSvn => "git-svn",
            VcsBackend::Mercurial => "hg",
        }
    }

    /// The executable this backend shells out to.
    pub const fn program(self) -> &'static str {
        match self {
            VcsBackend::Git | VcsBackend::GitSvn => "git",
            VcsBackend::Subversion => "svn",
            VcsBackend::Mercurial => "hg",
        }
    }

    /// Metadata entry whose presence marks a working copy of this kind.
    pub const fn marker(self) -> &'static str {
        match self {
            VcsBackend::Git | VcsBackend::GitSvn => ".git",
            VcsBackend::Subversion => ".svn",
            VcsBackend::Mercurial => ".hg",
        }
    }

    /// Whether `path` already holds a working copy of this kind.
    ///
    /// The marker may be a file: git worktrees and submodules use a `.git`
    /// file pointing at the real repository.
    pub fn is_working_copy(self, path: &Path) -> bool {
        path.join(self.marker()).exists()
    }

    /// Arguments (after the program name) used to clone `remote` into `local`.
    pub fn clone_args(self, remote: &Url, local: &Path, options: &CloneOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            VcsBackend::Git => vec!["clone".into()],
            VcsBackend::Subversion => vec!["checkout".into()],
            VcsBackend::GitSvn => vec!["svn".into(), "clone".into()],
            VcsBackend::Mercurial => vec!["clone".into()],
        };

        if self == VcsBackend::Git {
            if let Some(branch) = &options.branch {
                args.push("--branch".into());
                args.push(branch.into());
            }
        }
        if options.shallow && matches!(self, VcsBackend::Git | VcsBackend::Subversion) {
            args.push("--depth".into());
            args.push("1".into());
        }
        if options.recursive && self == VcsBackend::Git {
            args.push("--recursive".into());
        }

        args.push(remote.as_str().into());
        args.push(local.as_os_str().to_os_string());
        args
    }

    /// Arguments (after the program name) used to update a working copy.
    pub fn update_args(self) -> Vec<OsString> {
        let args: &[&str] = match self {
            VcsBackend::Git => &["pull", "--ff-only"],
            VcsBackend::Subversion => &["update"],
            VcsBackend::GitSvn => &["svn", "rebase"],
            VcsBackend::Mercurial => &["pull", "--update"],
        };
        args.iter().map(|arg| OsString::from(*arg)).collect()
    }

    /// Clone `remote` into `local`, creating any missing parent directories.
    ///
    /// Directory creation failures abort before the tool is run.
    pub fn clone_repository(
        self,
        runner: &dyn CommandRunner,
        remote: &Url,
        local: &Path,
        options: &CloneOptions,
    ) -> Result<()> {
        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Filesystem {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        info!("{}: cloning {} into {}", self, remote, local.display());
        runner.run(None, self.program(), &self.clone_args(remote, local, options))
    }

    /// Bring the working copy at `local` up to date.
    pub fn update(self, runner: &dyn CommandRunner, local: &Path) -> Result<()> {
        info!("{}: updating {}", self, local.display());
        runner.run(Some(local), self.program(), &self.update_args())
    }
}

impl fmt::Display for VcsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for VcsBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "git" => Ok(VcsBackend::Git),
            "svn" | "subversion" => Ok(VcsBackend::Subversion),
            "git-svn" | "gitsvn" => Ok(VcsBackend::GitSvn),
            "hg" | "mercurial" => Ok(VcsBackend::Mercurial),
            _ => Err(Error::UnsupportedRepository {
                kind: s.to_string(),
            }),
        }
    }
}

impl Serialize for VcsBackend {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for VcsBackend {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
