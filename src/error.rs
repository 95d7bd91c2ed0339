use std::fmt;
use std::io;

/// The one user-visible diagnostic line.
///
/// Every failed command surfaces this same message at the prompt; the typed
/// [`ShellError`] stays available for callers that want the details.
pub const INCORRECT_COMMAND: &str = "Shell: Incorrect command";

/// Errors produced while parsing or dispatching a single command line.
///
/// Every variant is terminal to the command it belongs to, never to the
/// interpreter itself: the loop reports the failure and prompts again.
#[derive(Debug)]
pub enum ShellError {
    /// A command held more tokens than the argument vector allows.
    ArgumentOverflow {
        /// The capacity that was exceeded.
        limit: usize,
    },
    /// An operator was present but one of its sides was empty after trimming.
    EmptySegment,
    /// The process-creation primitive itself failed.
    SpawnFailed(io::Error),
    /// The command name did not resolve to an executable program.
    ResolutionFailed(String),
    /// The redirection target could not be opened for writing.
    RedirectionOpenFailed {
        /// The filename as the user wrote it.
        path: String,
        source: io::Error,
    },
    /// `cd` could not change the interpreter's working directory.
    DirectoryChangeFailed(String),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::ArgumentOverflow { limit } => {
                write!(f, "too many arguments (limit is {})", limit)
            }
            ShellError::EmptySegment => write!(f, "empty command segment"),
            ShellError::SpawnFailed(e) => write!(f, "failed to spawn child process: {}", e),
            ShellError::ResolutionFailed(name) => write!(f, "no such command: {}", name),
            ShellError::RedirectionOpenFailed { path, source } => {
                write!(f, "cannot open {} for writing: {}", path, source)
            }
            ShellError::DirectoryChangeFailed(reason) => write!(f, "cd: {}", reason),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::SpawnFailed(e) => Some(e),
            ShellError::RedirectionOpenFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
