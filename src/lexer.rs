//! Whitespace tokenization and operator splitting for command lines.
//!
//! Everything here is pure: splitters borrow from their input and never
//! mutate it, so a raw line can be re-examined after a segment is cut out
//! of it.

use crate::error::ShellError;

/// Maximum number of tokens in one argument vector, program name included.
pub const MAX_ARGS: usize = 10;

/// Operator separating the segments of a parallel batch.
pub const PAR_OP: &str = "&&";
/// Operator separating the segments of a sequential batch.
pub const SEQ_OP: &str = "##";
/// Operator separating a command from its output file.
pub const REDIRECT_OP: &str = ">";

/// Strip leading and trailing ASCII whitespace from a span.
///
/// An all-whitespace or empty input yields the empty span. The predicate is
/// locale-independent on purpose.
pub fn trim(input: &str) -> &str {
    input.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Split a command into its argument vector.
///
/// Tokens are separated by runs of ASCII whitespace; consecutive separators
/// never produce empty tokens. An input with no tokens yields an empty
/// vector, which callers treat as a no-op command.
///
/// Fails with [`ShellError::ArgumentOverflow`] when the input holds more
/// than [`MAX_ARGS`] tokens; the vector is never silently truncated.
pub fn split_args(input: &str) -> Result<Vec<String>, ShellError> {
    let mut args = Vec::new();
    for token in input.split_ascii_whitespace() {
        if args.len() == MAX_ARGS {
            return Err(ShellError::ArgumentOverflow { limit: MAX_ARGS });
        }
        args.push(token.to_string());
    }
    Ok(args)
}

/// Split a batch line on an operator token.
///
/// Each piece is trimmed and the ones left empty are dropped, so a dangling
/// or doubled operator never produces an empty command. The segments borrow
/// from `line`.
pub fn split_segments<'a>(line: &'a str, operator: &'a str) -> impl Iterator<Item = &'a str> {
    line.split(operator).map(trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_strips_both_ends() {
        assert_eq!(trim("  ls -la  "), "ls -la");
        assert_eq!(trim("\t echo hi\t\t"), "echo hi");
    }

    #[test]
    fn trim_of_blank_input_is_empty() {
        assert_eq!(trim(""), "");
        assert_eq!(trim("   \t  "), "");
    }

    #[test]
    fn split_args_basic() {
        let args = split_args("ls -la /tmp").unwrap();
        assert_eq!(args, vec!["ls", "-la", "/tmp"]);
    }

    #[test]
    fn split_args_collapses_repeated_spaces() {
        let args = split_args("echo   hi").unwrap();
        assert_eq!(args, vec!["echo", "hi"]);
    }

    #[test]
    fn split_args_of_blank_input_is_empty() {
        assert!(split_args("").unwrap().is_empty());
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn split_args_accepts_exactly_the_limit() {
        let line = (0..MAX_ARGS).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(split_args(&line).unwrap().len(), MAX_ARGS);
    }

    #[test]
    fn split_args_rejects_overflow() {
        let line = (0..=MAX_ARGS).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        match split_args(&line) {
            Err(ShellError::ArgumentOverflow { limit }) => assert_eq!(limit, MAX_ARGS),
            other => panic!("expected ArgumentOverflow, got {:?}", other),
        }
    }

    #[test]
    fn split_segments_trims_and_drops_empties() {
        let segments: Vec<&str> =
            split_segments("echo a ## echo b ##   ## echo c ##", SEQ_OP).collect();
        assert_eq!(segments, vec!["echo a", "echo b", "echo c"]);
    }

    #[test]
    fn split_segments_on_parallel_operator() {
        let segments: Vec<&str> = split_segments(" sleep 1 && echo fast ", PAR_OP).collect();
        assert_eq!(segments, vec!["sleep 1", "echo fast"]);
    }

    #[test]
    fn split_segments_without_operator_yields_whole_line() {
        let segments: Vec<&str> = split_segments("  pwd  ", SEQ_OP).collect();
        assert_eq!(segments, vec!["pwd"]);
    }
}
