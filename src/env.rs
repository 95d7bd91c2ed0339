use std::env as stdenv;
use std::path::PathBuf;

/// Mutable, interpreter-owned state that survives across dispatched lines.
///
/// The environment contains:
/// - `current_dir`: the interpreter's working directory, kept in sync with
///   the process and displayed in the prompt.
/// - `should_exit`: a flag that the read-eval loop checks to know when to
///   stop requesting further lines.
///
/// The working directory is the only mutable resource shared between
/// components; it is written solely by the `cd` built-in and read by the
/// prompt, all on the single interpreter thread.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process state into a new `Environment`.
    ///
    /// `current_dir` is initialized from `std::env::current_dir()`; the
    /// `should_exit` flag starts as `false`.
    pub fn new() -> Self {
        Self {
            current_dir: stdenv::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
