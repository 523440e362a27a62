//! # Get Command Implementation
//!
//! This module implements the `get` subcommand, which clones each named
//! repository into the local layout, or updates it when a working copy is
//! already present.
//!
//! ## Functionality
//!
//! - **Reference forms**: full URLs, `user@host:owner/name`,
//!   `host/owner/name` and `owner/name` (GitHub) are all accepted.
//! - **Clone options**: `--branch`, `--shallow` and `--recursive` are passed
//!   to the backend on clone and ignored on update.
//! - **SSH**: `-p` rewrites `https` references to `ssh://git@host/...`.
//! - **Backend override**: `--vcs` forces a backend (`git`, `svn`,
//!   `git-svn`, `hg`).
//! - **Batches**: every reference is attempted even if an earlier one fails;
//!   the command exits non-zero if any failed. `--parallel` runs distinct
//!   repositories concurrently.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use console::style;

use ghq::config;
use ghq::error::Error;
use ghq::get::{GetOutcome, GetRequest, Getter};
use ghq::process::is_missing_tool;
use ghq::remote::RemoteReference;
use ghq::vcs::{CloneOptions, VcsBackend};

/// Clone or update repositories
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repositories to get: URL, user@host:owner/name, host/owner/name or owner/name
    #[arg(required = true, value_name = "REPOSITORY")]
    pub repositories: Vec<String>,

    /// Clone over SSH (ssh://git@host/...) instead of https
    #[arg(short = 'p', long)]
    pub ssh: bool,

    /// Clone only the most recent history
    #[arg(long)]
    pub shallow: bool,

    /// Clone submodules as well
    #[arg(long)]
    pub recursive: bool,

    /// Branch to check out on clone
    #[arg(short, long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Force a VCS backend (git, svn, git-svn, hg)
    #[arg(long, value_name = "VCS")]
    pub vcs: Option<String>,

    /// Root directory to clone into, overriding GHQ_ROOT and the config file
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Get distinct repositories concurrently
    #[arg(short = 'P', long)]
    pub parallel: bool,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let override_backend = args
        .vcs
        .as_deref()
        .map(str::parse::<VcsBackend>)
        .transpose()?;
    let registry = config.registry().with_override(override_backend);
    let roots = config.local_roots(args.root.as_deref());

    let options = CloneOptions {
        branch: args.branch.clone(),
        shallow: args.shallow,
        recursive: args.recursive,
    };
    let use_ssh = args.ssh || config.ssh;

    let mut failures = 0;
    let mut requests = Vec::new();
    for input in &args.repositories {
        match resolve(input, use_ssh) {
            Ok(reference) => requests.push(GetRequest {
                reference,
                options: options.clone(),
            }),
            Err(e) => {
                failures += 1;
                report_error(input, &e);
            }
        }
    }

    let getter = Getter::new(registry);
    for report in getter.get_all(&requests, &roots, args.parallel) {
        match report.result {
            Ok(GetOutcome::Cloned(path)) => println!(
                "{:>8} {} -> {}",
                style("clone").green().bold(),
                report.reference,
                path.display()
            ),
            Ok(GetOutcome::Updated(path)) => {
                println!("{:>8} {}", style("update").cyan().bold(), path.display())
            }
            Err(e) => {
                failures += 1;
                report_error(&report.reference.to_string(), &e);
                if is_missing_tool(&e) {
                    eprintln!(
                        "{:>8} is `{}` installed and on your PATH?",
                        style("hint").yellow(),
                        report.backend.program()
                    );
                }
            }
        }
    }

    if failures > 0 {
        bail!(
            "{} of {} repositories could not be fetched",
            failures,
            args.repositories.len()
        );
    }
    Ok(())
}

fn resolve(input: &str, use_ssh: bool) -> ghq::error::Result<RemoteReference> {
    let reference = RemoteReference::parse(input)?;
    if use_ssh {
        reference.with_ssh()
    } else {
        Ok(reference)
    }
}

fn report_error(subject: &str, error: &Error) {
    eprintln!("{:>8} {}: {}", style("error").red().bold(), subject, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain() {
        let reference = resolve("motemen/ghq-test-repo", false).unwrap();
        assert_eq!(
            reference.to_string(),
            "https://github.com/motemen/ghq-test-repo"
        );
    }

    #[test]
    fn test_resolve_ssh() {
        let reference = resolve("motemen/ghq-test-repo", true).unwrap();
        assert_eq!(
            reference.to_string(),
            "ssh://git@github.com/motemen/ghq-test-repo"
        );
    }

    #[test]
    fn test_resolve_invalid() {
        assert!(resolve("nope", false).is_err());
    }
}
