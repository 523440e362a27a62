//! # Backend Registry
//!
//! Decides which [`VcsBackend`] handles a given [`RemoteReference`]. The first
//! matching rule wins:
//!
//! 1. an explicit override (the `--vcs` flag);
//! 2. the URL scheme (`svn://`, `svn+ssh://` are Subversion);
//! 3. the host table (built-in hosts plus any from the config file);
//! 4. a `.git` suffix on the path;
//! 5. the default backend (Git unless configured otherwise).
//!
//! Because the last rule always matches, selection never fails.

use std::collections::BTreeMap;

use log::debug;

use crate::remote::RemoteReference;
use crate::vcs::VcsBackend;

/// Hosts that only serve one kind of repository.
const KNOWN_HOSTS: &[(&str, VcsBackend)] = &[
    ("github.com", VcsBackend::Git),
    ("gist.github.com", VcsBackend::Git),
    ("gitlab.com", VcsBackend::Git),
    ("bitbucket.org", VcsBackend::Git),
    ("codeberg.org", VcsBackend::Git),
    ("hg.mozilla.org", VcsBackend::Mercurial),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRegistry {
    default: VcsBackend,
    hosts: BTreeMap<String, VcsBackend>,
    override_backend: Option<VcsBackend>,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self {
            default: VcsBackend::Git,
            hosts: KNOWN_HOSTS
                .iter()
                .map(|(host, backend)| (host.to_string(), *backend))
                .collect(),
            override_backend: None,
        }
    }
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend used when nothing else matches.
    pub fn with_default(mut self, backend: VcsBackend) -> Self {
        self.default = backend;
        self
    }

    /// Add or replace a host rule. Hosts compare case-insensitively.
    pub fn with_host(mut self, host: &str, backend: VcsBackend) -> Self {
        self.hosts.insert(host.to_ascii_lowercase(), backend);
        self
    }

    /// Force every reference onto one backend.
    pub fn with_override(mut self, backend: Option<VcsBackend>) -> Self {
        self.override_backend = backend;
        self
    }

    pub fn select(&self, reference: &RemoteReference) -> VcsBackend {
        let backend = self.match_rule(reference);
        debug!("selected {} backend for {}", backend, reference);
        backend
    }

    fn match_rule(&self, reference: &RemoteReference) -> VcsBackend {
        if let Some(backend) = self.override_backend {
            return backend;
        }
        if matches!(reference.scheme(), "svn" | "svn+ssh") {
            return VcsBackend::Subversion;
        }
        if let Some(backend) = self.hosts.get(&reference.host().to_ascii_lowercase()) {
            return *backend;
        }
        if reference.url().path().ends_with(".git") {
            return VcsBackend::Git;
        }
        self.default
    }
}
