//! # Get Orchestration
//!
//! The `Getter` decides, for one remote reference, whether the local working
//! copy must be cloned or updated, and then hands the work to the selected
//! [`VcsBackend`].
//!
//! The decision is made by the backend's own working-copy check: a `.git`
//! entry for Git, `.svn` for Subversion, and so on. Update never looks at
//! [`CloneOptions`]. Branch, depth and submodule choices apply only to the
//! initial clone.
//!
//! A `Getter` holds no mutable state. Invocations against different local
//! paths can run at the same time; invocations against the same path must not,
//! which [`Getter::get_all`] guarantees by collapsing duplicates before it
//! fans out.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use crate::error::Result;
use crate::process::{CommandRunner, ProcessCommandRunner};
use crate::registry::BackendRegistry;
use crate::remote::{LocalRoots, RemoteReference};
use crate::vcs::{CloneOptions, VcsBackend};

/// What a successful get did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOutcome {
    Cloned(PathBuf),
    Updated(PathBuf),
}

impl GetOutcome {
    pub fn path(&self) -> &Path {
        match self {
            GetOutcome::Cloned(path) | GetOutcome::Updated(path) => path,
        }
    }
}

/// One repository to fetch as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub reference: RemoteReference,
    pub options: CloneOptions,
}

/// Result of one request in a batch, paired with its target.
#[derive(Debug)]
pub struct GetReport {
    pub reference: RemoteReference,
    pub backend: VcsBackend,
    pub local: PathBuf,
    pub result: Result<GetOutcome>,
}

pub struct Getter {
    registry: BackendRegistry,
    runner: Box<dyn CommandRunner>,
}

impl Getter {
    /// A getter that runs the real VCS tools.
    pub fn new(registry: BackendRegistry) -> Self {
        Self::with_runner(registry, Box::new(ProcessCommandRunner))
    }

    /// A getter with a custom process runner, e.g. one that records calls.
    pub fn with_runner(registry: BackendRegistry, runner: Box<dyn CommandRunner>) -> Self {
        Self { registry, runner }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Clone `reference` under `root`, or update it if a working copy is
    /// already there.
    pub fn get(
        &self,
        reference: &RemoteReference,
        root: &Path,
        options: &CloneOptions,
    ) -> Result<GetOutcome> {
        let backend = self.registry.select(reference);
        self.get_with_backend(backend, reference, &reference.local_path(root), options)
    }

    fn get_with_backend(
        &self,
        backend: VcsBackend,
        reference: &RemoteReference,
        local: &Path,
        options: &CloneOptions,
    ) -> Result<GetOutcome> {
        if backend.is_working_copy(local) {
            info!("update {}", local.display());
            backend.update(self.runner.as_ref(), local)?;
            Ok(GetOutcome::Updated(local.to_path_buf()))
        } else {
            info!("clone {} -> {}", reference, local.display());
            backend.clone_repository(self.runner.as_ref(), reference.url(), local, options)?;
            Ok(GetOutcome::Cloned(local.to_path_buf()))
        }
    }

    /// Fetch several repositories.
    ///
    /// Each reference is placed in the root that already holds it, or the
    /// primary root otherwise. Requests resolving to a local path seen earlier
    /// in the batch are dropped. With `parallel`, the remaining requests run
    /// on the rayon thread pool. Reports come back in request order, and one
    /// failure never stops the others.
    pub fn get_all(
        &self,
        requests: &[GetRequest],
        roots: &LocalRoots,
        parallel: bool,
    ) -> Vec<GetReport> {
        let mut seen = HashSet::new();
        let planned: Vec<(&GetRequest, VcsBackend, PathBuf)> = requests
            .iter()
            .filter_map(|request| {
                let backend = self.registry.select(&request.reference);
                let root = roots.locate(&request.reference, backend);
                let local = request.reference.local_path(root);
                if seen.insert(local.clone()) {
                    Some((request, backend, local))
                } else {
                    debug!("skipping duplicate {}", request.reference);
                    None
                }
            })
            .collect();

        if parallel {
            planned
                .par_iter()
                .map(|(request, backend, local)| self.run_planned(request, *backend, local))
                .collect()
        } else {
            planned
                .iter()
                .map(|(request, backend, local)| self.run_planned(request, *backend, local))
                .collect()
        }
    }

    fn run_planned(&self, request: &GetRequest, backend: VcsBackend, local: &Path) -> GetReport {
        GetReport {
            reference: request.reference.clone(),
            backend,
            local: local.to_path_buf(),
            result: self.get_with_backend(backend, &request.reference, local, &request.options),
        }
    }
}
