//! # Error Handling
//!
//! This module defines the centralized error type for `ghq`. It uses the
//! `thiserror` library to create an `Error` enum that covers every failure a
//! get operation can hit, each variant carrying enough context to explain
//! itself to the user.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants fall into four groups:
//!   - configuration problems (unknown repository kind, bad config file,
//!     malformed reference), reported before any operation is attempted;
//!   - filesystem failures while preparing the local path;
//!   - tool invocation failures, where the external VCS tool could not be
//!     started at all;
//!   - tool execution failures, where the tool ran and exited non-zero.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Errors are never retried or recovered from inside the library. Every
//! variant is returned to the immediate caller as-is.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for ghq operations
#[derive(Error, Debug)]
pub enum Error {
    /// A repository kind name did not match any known VCS backend.
    #[error("Unsupported repository kind: {kind}")]
    UnsupportedRepository { kind: String },

    /// A reference string could not be turned into a remote repository URL.
    #[error("Invalid repository reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// The configuration file could not be read or parsed.
    #[error("Configuration error in {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A directory needed for the working copy could not be created.
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external tool could not be started (usually not installed).
    #[error("Failed to run '{tool}': {source}")]
    ToolInvocation {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool started but exited unsuccessfully.
    #[error("Command failed: {tool} {} ({status})", args.join(" "))]
    ToolExecution {
        tool: String,
        args: Vec<String>,
        status: String,
    },

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
