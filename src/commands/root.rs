//! # Root Command Implementation
//!
//! Prints the directory new working copies are cloned into, or with `--all`
//! every configured root in lookup order.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use ghq::config;

/// Show root directories
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Print every configured root, primary first
    #[arg(long)]
    pub all: bool,

    /// Use this root instead of the configured ones
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Execute the `root` command.
pub fn execute(args: RootArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;
    let roots = config.local_roots(args.root.as_deref());

    if args.all {
        for root in roots.all() {
            println!("{}", root.display());
        }
    } else {
        println!("{}", roots.primary().display());
    }
    Ok(())
}
