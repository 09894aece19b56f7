use std::env;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use tokio::process::Command;

const DEFAULT_SHELL: &str = "sh";

/// Shell used to launch finders and install scripts.
///
/// Finders are started as `<shell> -c "<path> <args...>"` so argument quoting
/// and terminal handling behave the way they do when a human types the same
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    path: Utf8PathBuf,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl Shell {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `$SHELL` when it is set and non-empty, otherwise `sh`.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("SHELL") {
            Ok(shell) if !shell.is_empty() => Self::new(shell),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Builds a process that runs `line` through this shell.
    #[must_use]
    pub fn command(&self, line: &str) -> Command {
        let mut cmd = Command::new(self.path.as_std_path());
        cmd.arg("-c").arg(line);
        cmd
    }
}

/// Quotes `arg` so the shell passes it through as one literal word.
#[must_use]
pub fn quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}
