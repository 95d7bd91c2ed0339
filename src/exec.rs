//! Child-process execution strategies.
//!
//! Four strategies cover every dispatched line: a single foreground
//! command, a command with its output redirected to a file, a
//! `##`-separated batch run strictly in order, and a `&&`-separated batch
//! fanned out into concurrent children. All of them spawn through one
//! shared helper. The helper resets the child's keyboard-signal
//! dispositions before the program image is loaded.

use crate::builtin;
use crate::env::Environment;
use crate::error::{INCORRECT_COMMAND, ShellError};
use crate::lexer::{PAR_OP, REDIRECT_OP, SEQ_OP, split_args, split_segments, trim};
use nix::sys::signal::{SigHandler, Signal, signal};
use nix::sys::wait::{WaitPidFlag, waitpid};
use nix::unistd::Pid;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};

/// Maximum number of children a parallel batch will fan out to.
///
/// Segments beyond this bound are dropped by the splitter. This limitation
/// is deliberate and documented.
pub const MAX_PARALLEL: usize = 8;

/// Run one argument vector as a foreground child process.
///
/// The call blocks until the child exits or stops; a stopped child simply
/// returns control to the prompt, there is no job table to park it in. The
/// child's exit status is not interpreted. An empty vector is a no-op.
pub fn run_single(args: &[String]) -> Result<(), ShellError> {
    let Some((program, rest)) = args.split_first() else {
        return Ok(());
    };
    let child = spawn(program, rest, None)?;
    wait_foreground(&child);
    Ok(())
}

/// Run a line of the form `command > file` with the child's standard output
/// rebound to the file.
///
/// The target is created if absent and truncated otherwise, mode 0644. Both
/// sides of the operator must be non-empty after trimming. Waiting behaves
/// exactly as in [`run_single`].
pub fn run_redirected(line: &str) -> Result<(), ShellError> {
    let Some((command, filename)) = line.split_once(REDIRECT_OP) else {
        return Err(ShellError::EmptySegment);
    };
    let (command, filename) = (trim(command), trim(filename));
    if command.is_empty() || filename.is_empty() {
        return Err(ShellError::EmptySegment);
    }
    let args = split_args(command)?;
    let Some((program, rest)) = args.split_first() else {
        return Err(ShellError::EmptySegment);
    };
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(filename)
        .map_err(|e| ShellError::RedirectionOpenFailed {
            path: filename.to_string(),
            source: e,
        })?;
    let child = spawn(program, rest, Some(Stdio::from(file)))?;
    wait_foreground(&child);
    Ok(())
}

/// Run each `##`-separated segment to completion, strictly left to right.
///
/// A `cd` segment is handled in-process; anything else is dispatched as a
/// foreground child. Segment N+1 never starts before segment N's child has
/// exited or stopped, and the batch never aborts early: a failed segment
/// reports its diagnostic and the rest still run.
pub fn run_sequential(env: &mut Environment, line: &str) {
    for segment in split_segments(line, SEQ_OP) {
        if run_segment(env, segment).is_err() {
            println!("{}", INCORRECT_COMMAND);
        }
    }
}

fn run_segment(env: &mut Environment, segment: &str) -> anyhow::Result<()> {
    let args = split_args(segment)?;
    if let Some(result) = builtin::run_directory_change(env, &args) {
        return result;
    }
    run_single(&args)?;
    Ok(())
}

/// Fan a `&&`-separated line out into concurrent children, then collect them.
///
/// At most [`MAX_PARALLEL`] segments are honored; the rest of the line is
/// dropped. All spawns are issued before any wait begins, and waiting
/// happens in spawn order. Completion order is up to the scheduler.
/// A segment whose spawn fails is reported on the spot, but children that
/// were already started are still waited on; none are left behind.
pub fn run_parallel(line: &str) {
    let mut children = Vec::new();
    for segment in split_segments(line, PAR_OP).take(MAX_PARALLEL) {
        match spawn_segment(segment) {
            Ok(Some(child)) => children.push(child),
            Ok(None) => {}
            Err(_) => println!("{}", INCORRECT_COMMAND),
        }
    }
    for child in &mut children {
        let _ = child.wait();
    }
}

fn spawn_segment(segment: &str) -> Result<Option<Child>, ShellError> {
    let args = split_args(segment)?;
    let Some((program, rest)) = args.split_first() else {
        return Ok(None);
    };
    spawn(program, rest, None).map(Some)
}

/// Spawn a child with its keyboard-signal dispositions reset.
///
/// The interpreter ignores SIGINT and SIGTSTP; the child must not inherit
/// that disposition or it could not be interrupted or suspended from the
/// terminal. The reset happens between fork and image replacement.
fn spawn(program: &str, args: &[String], stdout: Option<Stdio>) -> Result<Child, ShellError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(stdout) = stdout {
        cmd.stdout(stdout);
    }
    unsafe {
        cmd.pre_exec(|| {
            restore_default(Signal::SIGINT)?;
            restore_default(Signal::SIGTSTP)?;
            Ok(())
        });
    }
    cmd.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            ShellError::ResolutionFailed(program.to_string())
        }
        _ => ShellError::SpawnFailed(e),
    })
}

/// Restore the default disposition for one signal in the child-to-be.
///
/// Runs post-fork, pre-exec; only async-signal-safe calls are allowed here.
fn restore_default(sig: Signal) -> io::Result<()> {
    unsafe { signal(sig, SigHandler::SigDfl) }
        .map(|_| ())
        .map_err(|e| io::Error::from_raw_os_error(e as i32))
}

/// Block until the child exits or stops.
///
/// The stop case mirrors interactive job-control conventions: a Ctrl-Z'd
/// child hands the terminal back to the prompt and is otherwise left alone.
fn wait_foreground(child: &Child) {
    let pid = Pid::from_raw(child.id() as i32);
    let _ = waitpid(pid, Some(WaitPidFlag::WUNTRACED));
}
