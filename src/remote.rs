//! # Remote References and Local Paths
//!
//! Turns whatever the user typed into a [`RemoteReference`] (a normalized
//! remote URL) and maps that reference onto the local directory layout
//! `<root>/<host>/<owner>/<name>`.
//!
//! Accepted input forms:
//!
//! - a full URL with a scheme: `https://github.com/owner/name`,
//!   `ssh://git@example.org/owner/name.git`, `svn+ssh://...`
//! - scp-like SSH: `git@github.com:owner/name.git`
//! - host-qualified shorthand: `gitlab.com/group/sub/name`
//! - GitHub shorthand: `owner/name`
//!
//! Path segments are percent-decoded before they become directory names, so
//! `owner/my%20repo` lives in `owner/my repo`. A non-default port stays part
//! of the host directory (`example.com:8443`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::error::{Error, Result};
use crate::vcs::VcsBackend;

/// Host assumed for `owner/name` shorthand.
pub const DEFAULT_HOST: &str = "github.com";

static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z0-9._-]+)@)?([A-Za-z0-9.-]+):/?([^/].*)$").unwrap()
});

/// A normalized remote repository URL.
///
/// Always has a non-empty host and at least two path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReference {
    url: Url,
}

impl RemoteReference {
    /// Parse user input in any of the accepted forms.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "reference is empty"));
        }

        let url = if trimmed.contains("://") {
            Url::parse(trimmed)?
        } else if let Some(caps) = SCP_LIKE.captures(trimmed) {
            let user = caps.get(1).map(|m| format!("{}@", m.as_str()));
            Url::parse(&format!(
                "ssh://{}{}/{}",
                user.unwrap_or_default(),
                &caps[2],
                &caps[3]
            ))?
        } else {
            let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
            match segments.as_slice() {
                [host, rest @ ..] if host.contains('.') => {
                    Url::parse(&format!("https://{}/{}", host, rest.join("/")))?
                }
                _ => Url::parse(&format!("https://{}/{}", DEFAULT_HOST, segments.join("/")))?,
            }
        };

        Self::from_url(url).map_err(|err| match err {
            Error::InvalidReference { message, .. } => invalid(input, &message),
            other => other,
        })
    }

    /// Validate and normalize an already-parsed URL.
    ///
    /// Empty path segments (doubled or trailing slashes) are dropped.
    pub fn from_url(mut url: Url) -> Result<Self> {
        let original = url.to_string();

        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid(&original, "missing host"));
        }

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        for segment in &segments {
            let decoded = percent_decode_str(segment)
                .decode_utf8()
                .map_err(|_| invalid(&original, "path is not valid UTF-8"))?;
            if decoded == "." || decoded == ".." {
                return Err(invalid(&original, "relative path segments are not allowed"));
            }
            if decoded.is_empty() || decoded.contains(['/', '\\', '\0']) {
                return Err(invalid(&original, "path segment cannot be used as a directory"));
            }
        }
        if segments.len() < 2 {
            return Err(invalid(&original, "expected at least owner/name in the path"));
        }
        if segments
            .last()
            .is_some_and(|name| strip_git_suffix(name).is_empty())
        {
            return Err(invalid(&original, "repository name is empty"));
        }

        url.set_path(&format!("/{}", segments.join("/")));
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host, followed by `:port` when the URL names a non-default port.
    pub fn authority(&self) -> String {
        match self.url.port() {
            Some(port) => format!("{}:{}", self.host(), port),
            None => self.host().to_string(),
        }
    }

    /// Non-empty, percent-decoded path segments, owner first.
    pub fn path_segments(&self) -> Vec<String> {
        self.url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rewrite an `http(s)` reference into `ssh://git@<host>/<path>`.
    ///
    /// Other schemes are returned unchanged.
    pub fn with_ssh(&self) -> Result<Self> {
        if !matches!(self.scheme(), "http" | "https") {
            return Ok(self.clone());
        }
        let url = Url::parse(&format!("ssh://git@{}{}", self.authority(), self.url.path()))?;
        Self::from_url(url)
    }

    /// The working copy location for this reference under `root`.
    ///
    /// A trailing `.git` on the last segment is dropped, so
    /// `https://host/owner/name.git` and `https://host/owner/name` share a
    /// directory.
    pub fn local_path(&self, root: &Path) -> PathBuf {
        let segments = self.path_segments();
        let mut path = root.join(self.authority());
        if let Some((last, parents)) = segments.split_last() {
            for segment in parents {
                path.push(segment);
            }
            path.push(strip_git_suffix(last));
        }
        path
    }
}

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}

impl fmt::Display for RemoteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

fn invalid(reference: &str, message: &str) -> Error {
    Error::InvalidReference {
        reference: reference.to_string(),
        message: message.to_string(),
    }
}

/// The configured root directories, primary first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRoots {
    roots: Vec<PathBuf>,
}

impl LocalRoots {
    pub fn new(primary: PathBuf, others: Vec<PathBuf>) -> Self {
        let mut roots = vec![primary];
        roots.extend(others);
        Self { roots }
    }

    /// Returns `None` when `roots` is empty.
    pub fn from_paths(roots: Vec<PathBuf>) -> Option<Self> {
        if roots.is_empty() {
            None
        } else {
            Some(Self { roots })
        }
    }

    /// New clones go here.
    pub fn primary(&self) -> &Path {
        &self.roots[0]
    }

    pub fn all(&self) -> &[PathBuf] {
        &self.roots
    }

    /// The root to use for `reference`: the first one already holding a
    /// working copy of it, otherwise the primary root.
    pub fn locate(&self, reference: &RemoteReference, backend: VcsBackend) -> &Path {
        self.roots
            .iter()
            .find(|root| backend.is_working_copy(&reference.local_path(root)))
            .map(PathBuf::as_path)
            .unwrap_or_else(|| self.primary())
    }
}
