//! External process execution.
//!
//! Every clone or update ends in a call to an installed VCS tool. The
//! `CommandRunner` trait is the single seam through which that happens, so the
//! argument construction in [`crate::vcs`] can be exercised without spawning
//! real processes.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Runs an external program to completion.
///
/// When `dir` is given it becomes the working directory of that one
/// invocation only. A non-zero exit status must be reported as an error.
/// Arguments are passed through byte for byte, so paths that are not valid
/// UTF-8 reach the tool unchanged.
pub trait CommandRunner: Send + Sync {
    fn run(&self, dir: Option<&Path>, program: &str, args: &[OsString]) -> Result<()>;
}

/// The default runner: spawns the program with inherited stdio so the tool's
/// own progress output reaches the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, dir: Option<&Path>, program: &str, args: &[OsString]) -> Result<()> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }

        match dir {
            Some(dir) => debug!(
                "running {} {} in {}",
                program,
                display_args(args).join(" "),
                dir.display()
            ),
            None => debug!("running {} {}", program, display_args(args).join(" ")),
        }

        let status = command.status().map_err(|source| Error::ToolInvocation {
            tool: program.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(Error::ToolExecution {
                tool: program.to_string(),
                args: display_args(args),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

/// Arguments rendered for messages. Invalid UTF-8 is replaced.
pub fn display_args(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Returns true if `err` means the program itself could not be found.
pub fn is_missing_tool(err: &Error) -> bool {
    matches!(
        err,
        Error::ToolInvocation { source, .. } if source.kind() == io::ErrorKind::NotFound
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn os_strings(args: &[&str]) -> Vec<OsString> {
        args.iter().map(|arg| OsString::from(*arg)).collect()
    }

    #[test]
    fn test_missing_program_is_tool_invocation_error() {
        let err = ProcessCommandRunner
            .run(None, "ghq-definitely-not-installed-tool", &[])
            .unwrap_err();

        assert!(matches!(err, Error::ToolInvocation { ref tool, .. } if tool == "ghq-definitely-not-installed-tool"));
        assert!(is_missing_tool(&err));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_tool_execution_error() {
        let err = ProcessCommandRunner
            .run(None, "sh", &os_strings(&["-c", "exit 3"]))
            .unwrap_err();

        match err {
            Error::ToolExecution { tool, args, status } => {
                assert_eq!(tool, "sh");
                assert_eq!(args, strings(&["-c", "exit 3"]));
                assert!(status.contains('3'), "status was {status}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_working_directory_applies_to_invocation() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker"), b"").unwrap();

        ProcessCommandRunner
            .run(
                Some(temp_dir.path()),
                "sh",
                &os_strings(&["-c", "test -f marker"]),
            )
            .unwrap();

        // Without the directory the relative path no longer resolves.
        let other = TempDir::new().unwrap();
        let result = ProcessCommandRunner.run(
            Some(other.path()),
            "sh",
            &os_strings(&["-c", "test -f marker"]),
        );
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_reaches_tool_unchanged() {
        use std::os::unix::ffi::OsStringExt;

        let temp_dir = TempDir::new().unwrap();
        let name = OsString::from_vec(b"caf\xe9".to_vec());
        std::fs::write(temp_dir.path().join(&name), b"").unwrap();

        let args = vec![OsString::from("-c"), OsString::from("test -f \"$0\""), name];
        ProcessCommandRunner
            .run(Some(temp_dir.path()), "sh", &args)
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_display_args_replaces_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let mut args = os_strings(&["clone", "--depth", "1"]);
        args.push(OsString::from_vec(b"/src/caf\xe9".to_vec()));

        assert_eq!(
            display_args(&args),
            strings(&["clone", "--depth", "1", "/src/caf\u{FFFD}"])
        );
    }

    #[test]
    fn test_execution_failure_is_not_missing_tool() {
        let err = Error::ToolExecution {
            tool: "git".to_string(),
            args: vec![],
            status: "exit status: 128".to_string(),
        };
        assert!(!is_missing_tool(&err));
    }
}
