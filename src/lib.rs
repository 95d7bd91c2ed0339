//! A tiny interactive command interpreter.
//!
//! This crate reads a line of text and interprets a small set of control
//! operators: `&&` for parallel fan-out, `##` for sequential chaining and
//! `>` for output redirection. It resolves `cd` and `exit` in-process and
//! delegates everything else to external programs as child processes.
//! It is intentionally small and easy to read, suitable for experiments
//! with process management and argument parsing.
//!
//! The main entry point is [`Interpreter`], which dispatches single lines
//! or runs a full read-eval loop. The public modules [`lexer`], [`env`]
//! and [`error`] expose the tokenizer, the interpreter state, and the
//! error taxonomy.

mod builtin;
pub mod env;
pub mod error;
pub mod exec;
mod interpreter;
pub mod lexer;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;
