use crate::env::Environment;
use crate::error::ShellError;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::env as stdenv;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Executes the command against the interpreter's environment.
    fn execute(self, env: &mut Environment) -> Result<()>;
}

/// Try to run `args` as a built-in command.
///
/// `None` means the command name is not a built-in and should be dispatched
/// as an external program.
pub(crate) fn run_builtin(env: &mut Environment, args: &[String]) -> Option<Result<()>> {
    run_as::<Cd>(env, args).or_else(|| run_as::<Exit>(env, args))
}

/// Whether the first token of a line names the exit built-in.
///
/// Exit is intercepted before operator detection, so a line like
/// `exit ## ls` stops the interpreter instead of running a batch.
pub(crate) fn is_exit_request(line: &str) -> bool {
    line.split_ascii_whitespace().next() == Some(Exit::name())
}

/// The directory-change built-in alone.
///
/// Sequential batches recognize `cd` between `##` separators but nothing
/// else; `exit` inside a batch falls through to external dispatch.
pub(crate) fn run_directory_change(env: &mut Environment, args: &[String]) -> Option<Result<()>> {
    run_as::<Cd>(env, args)
}

fn run_as<T: BuiltinCommand>(env: &mut Environment, args: &[String]) -> Option<Result<()>> {
    let (name, rest) = args.split_first()?;
    if name != T::name() {
        return None;
    }
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    Some(match T::from_args(&[name], &rest) {
        Ok(cmd) => cmd.execute(env),
        Err(EarlyExit { output, status }) => match status {
            Ok(()) => {
                print!("{}", output);
                Ok(())
            }
            Err(()) => Err(anyhow::anyhow!("{}: {}", T::name(), output.trim_end())),
        },
    })
}

#[derive(FromArgs)]
/// Change the interpreter's working directory.
pub(crate) struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        let Some(target) = self.target.filter(|t| !t.is_empty()) else {
            return Err(ShellError::DirectoryChangeFailed("missing directory operand".into()).into());
        };
        // The change must happen in the interpreter process itself; a child's
        // directory change would vanish when the child exits.
        stdenv::set_current_dir(&target)
            .map_err(|e| ShellError::DirectoryChangeFailed(format!("{}: {}", target, e)))?;
        env.current_dir = stdenv::current_dir()
            .map_err(|e| ShellError::DirectoryChangeFailed(e.to_string()))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Stop the interpreter after the current line.
pub(crate) struct Exit {
    #[argh(positional, greedy)]
    /// ignored; exit takes effect regardless of what follows it.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.should_exit = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn unknown_name_is_not_a_builtin() {
        let mut env = Environment::new();
        assert!(run_builtin(&mut env, &args(&["ls", "-la"])).is_none());
        assert!(run_builtin(&mut env, &[]).is_none());
    }

    #[test]
    fn exit_sets_the_flag_without_spawning() {
        let mut env = Environment::new();
        run_builtin(&mut env, &args(&["exit"])).unwrap().unwrap();
        assert!(env.should_exit);
    }

    #[test]
    fn exit_ignores_extra_arguments() {
        let mut env = Environment::new();
        run_builtin(&mut env, &args(&["exit", "now", "please"]))
            .unwrap()
            .unwrap();
        assert!(env.should_exit);
    }

    #[test]
    fn cd_without_argument_fails_and_changes_nothing() {
        let mut env = Environment::new();
        let before = env.current_dir.clone();
        let res = run_builtin(&mut env, &args(&["cd"])).unwrap();
        assert!(res.is_err());
        assert_eq!(env.current_dir, before);
    }

    #[test]
    fn cd_to_nonexistent_path_fails_and_changes_nothing() {
        let mut env = Environment::new();
        let before = env.current_dir.clone();
        let res = run_builtin(&mut env, &args(&["cd", "/nonexistent-path-xyz"])).unwrap();
        assert!(res.is_err());
        assert_eq!(env.current_dir, before);
        assert!(!env.should_exit);
    }

    #[test]
    fn cd_with_extra_arguments_is_rejected() {
        let mut env = Environment::new();
        let res = run_builtin(&mut env, &args(&["cd", "/tmp", "/var"])).unwrap();
        assert!(res.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn cd_moves_the_interpreter_process() {
        let cwd_before = stdenv::current_dir().expect("cwd");
        let tmp_base = stdenv::temp_dir().join(format!("builtin_tests_{}_cd", std::process::id()));
        let _ = fs::remove_dir_all(&tmp_base);
        fs::create_dir_all(&tmp_base).expect("create temp dir");

        let mut env = Environment::new();
        let target = tmp_base.to_string_lossy().into_owned();
        let res = run_builtin(&mut env, &args(&["cd", &target])).unwrap();

        // Restore early so a failed assertion doesn't strand later tests.
        stdenv::set_current_dir(&cwd_before).ok();

        res.unwrap();
        assert!(
            env.current_dir.ends_with(tmp_base.file_name().unwrap()),
            "expected to land in {:?}, got {:?}",
            tmp_base,
            env.current_dir
        );
        let _ = fs::remove_dir_all(tmp_base);
    }

    #[test]
    fn cd_is_the_only_builtin_in_batches() {
        let mut env = Environment::new();
        assert!(run_directory_change(&mut env, &args(&["exit"])).is_none());
        assert!(run_directory_change(&mut env, &args(&["cd"])).is_some());
    }
}
