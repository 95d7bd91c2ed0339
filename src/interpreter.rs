use crate::builtin;
use crate::env::Environment;
use crate::error::INCORRECT_COMMAND;
use crate::exec;
use crate::lexer::{PAR_OP, REDIRECT_OP, SEQ_OP, split_args, trim};
use nix::sys::signal::{SigHandler, Signal, signal};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};

/// An interactive command interpreter.
///
/// The interpreter owns an [`Environment`] and routes each input line to
/// exactly one execution strategy based on the operators it contains. It is
/// strictly single-threaded: every executor blocks until its children have
/// exited or stopped before the next line is read.
///
/// Example
/// ```no_run
/// use minishell::Interpreter;
/// let mut sh = Interpreter::default();
/// sh.dispatch("echo hello").unwrap();
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    /// Create an interpreter capturing the current process state.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Whether a dispatched `exit` has asked the loop to stop.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Route one input line to the execution strategy its operators call for.
    ///
    /// A line whose first token is `exit` stops the interpreter before any
    /// operator detection. After that, detection order is fixed: parallel
    /// batch first, then sequential batch, then redirection, then a plain
    /// command with built-ins checked before anything is spawned.
    /// Detection is a substring scan over the
    /// whole line; with no quoting rules, an operator character inside a
    /// filename or argument is genuinely ambiguous and wins.
    ///
    /// A blank line is a no-op. Errors are terminal to this line only.
    pub fn dispatch(&mut self, line: &str) -> anyhow::Result<()> {
        let line = trim(line);
        if line.is_empty() {
            return Ok(());
        }
        // Exit is checked before operator routing; anything after the first
        // token is ignored.
        if builtin::is_exit_request(line) {
            self.env.should_exit = true;
            return Ok(());
        }
        if line.contains(PAR_OP) {
            exec::run_parallel(line);
        } else if line.contains(SEQ_OP) {
            exec::run_sequential(&mut self.env, line);
        } else if line.contains(REDIRECT_OP) {
            exec::run_redirected(line)?;
        } else {
            let args = split_args(line)?;
            match builtin::run_builtin(&mut self.env, &args) {
                Some(result) => result?,
                None => exec::run_single(&args)?,
            }
        }
        Ok(())
    }

    /// The Read-Eval loop: prompt with the current directory, dispatch each
    /// line, report failures, and keep going until `exit` or end of input.
    ///
    /// On entry the interpreter's own SIGINT and SIGTSTP dispositions are
    /// set to ignore, so keyboard signals only reach the foreground child
    /// (which gets the default dispositions back at spawn time).
    pub fn repl(&mut self) -> Result<()> {
        unsafe {
            let _ = signal(Signal::SIGINT, SigHandler::SigIgn);
            let _ = signal(Signal::SIGTSTP, SigHandler::SigIgn);
        }

        let mut rl = DefaultEditor::new()?;
        loop {
            let prompt = format!("{}$ ", self.env.current_dir.display());
            match rl.readline(&prompt) {
                Ok(line) => {
                    if trim(&line).is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str())?;
                    if self.dispatch(&line).is_err() {
                        println!("{}", INCORRECT_COMMAND);
                    }
                    if self.env.should_exit {
                        println!("Exiting shell...");
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    println!("Exiting shell...");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
