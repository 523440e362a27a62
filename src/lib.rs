//! # ghq Library
//!
//! This library provides the core of the `ghq` command-line tool: it locates,
//! clones and updates local working copies of remote repositories, keeping
//! them under a predictable `<root>/<host>/<owner>/<name>` layout.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use ghq::registry::BackendRegistry;
//! use ghq::remote::RemoteReference;
//! use ghq::vcs::VcsBackend;
//!
//! let reference = RemoteReference::parse("motemen/ghq-test-repo").unwrap();
//! assert_eq!(reference.to_string(), "https://github.com/motemen/ghq-test-repo");
//!
//! let local = reference.local_path(Path::new("/tmp/root"));
//! assert_eq!(local, Path::new("/tmp/root/github.com/motemen/ghq-test-repo"));
//!
//! let backend = BackendRegistry::new().select(&reference);
//! assert_eq!(backend, VcsBackend::Git);
//! ```
//!
//! ## Core Concepts
//!
//! - **References (`remote`)**: Parse user input (URLs, scp-like SSH
//!   addresses, `owner/name` shorthand) into a normalized remote URL, and map
//!   it to a local path under one of the configured roots.
//! - **Backends (`vcs`)**: Git, Subversion, git-svn and Mercurial, each
//!   turning the uniform clone/update contract into the right tool invocation.
//! - **Registry (`registry`)**: Chooses the backend for a reference.
//! - **Orchestration (`get`)**: Clones when no working copy exists yet,
//!   updates otherwise.
//! - **Process execution (`process`)**: The seam through which every external
//!   tool is run, replaceable in tests.
//!
//! ## Execution Flow
//!
//! 1.  **Resolve**: reference string → [`remote::RemoteReference`].
//! 2.  **Select**: [`registry::BackendRegistry`] picks a [`vcs::VcsBackend`].
//! 3.  **Locate**: the local path is computed under the chosen root.
//! 4.  **Dispatch**: [`get::Getter`] checks the backend's marker directory and
//!     runs either clone or update.

pub mod config;
pub mod defaults;
pub mod error;
pub mod get;
pub mod process;
pub mod registry;
pub mod remote;
pub mod vcs;

#[cfg(test)]
mod remote_proptest;
