//! # Configuration
//!
//! `ghq` reads an optional YAML file describing where working copies live and
//! how repositories map to VCS backends:
//!
//! ```yaml
//! roots:
//!   - ~/src
//!   - /mnt/archive/src
//! default_vcs: git
//! ssh: false
//! hosts:
//!   hg.example.org: hg
//!   svn.example.org: svn
//! ```
//!
//! ## Lookup
//!
//! The file is taken from the `--config` flag, then the `GHQ_CONFIG`
//! environment variable, then the platform config directory
//! (see [`crate::defaults::default_config_path`]). Only an explicitly named
//! file must exist; a missing default file just means "use defaults".
//!
//! ## Roots
//!
//! Root directories are resolved with the precedence `--root` flag >
//! `GHQ_ROOT` > `roots` in the file > `~/ghq`.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults::{default_config_path, default_root, CONFIG_ENV, ROOT_ENV};
use crate::error::{Error, Result};
use crate::registry::BackendRegistry;
use crate::remote::LocalRoots;
use crate::vcs::VcsBackend;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root directories, primary first. `~` expands to the home directory.
    pub roots: Vec<PathBuf>,
    /// Backend for references no other rule matches.
    pub default_vcs: Option<VcsBackend>,
    /// Rewrite `https` references to `ssh://git@...` by default.
    pub ssh: bool,
    /// Host name to backend.
    pub hosts: BTreeMap<String, VcsBackend>,
}

/// Parse configuration text. `origin` is only used in error messages.
pub fn parse(content: &str, origin: &Path) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(&content, path)
}

/// Locate and load the configuration, falling back to defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return from_file(path);
    }
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return from_file(PathBuf::from(path));
    }
    match default_config_path() {
        Some(path) if path.is_file() => from_file(path),
        _ => {
            debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Build the backend registry described by this configuration.
    pub fn registry(&self) -> BackendRegistry {
        let mut registry = BackendRegistry::new();
        if let Some(backend) = self.default_vcs {
            registry = registry.with_default(backend);
        }
        for (host, backend) in &self.hosts {
            registry = registry.with_host(host, *backend);
        }
        registry
    }

    /// Resolve root directories; `flag` is the `--root` command line value.
    pub fn local_roots(&self, flag: Option<&Path>) -> LocalRoots {
        let roots = if let Some(root) = flag {
            vec![root.to_path_buf()]
        } else if let Some(value) = env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
            env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        } else {
            self.roots.clone()
        };

        let mut roots = roots.iter().map(|root| expand_home(root));
        let primary = roots.next().unwrap_or_else(default_root);
        LocalRoots::new(primary, roots.collect())
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
