use std::io;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

/// Exit code most finders use when the human aborts the selection.
const ABORT_CODE: i32 = 130;

/// Everything that can go wrong while resolving or driving a finder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The explicitly requested finder is not on the search path.
    #[error("{name}: not found")]
    NotFound { name: String },

    /// None of the registry presets is on the search path.
    #[error("no available finder command")]
    NoAvailableCommand,

    /// `select` was called with nothing to choose from.
    #[error("no items")]
    NoItems,

    /// Dynamic input was neither a list of strings nor a set of key/value
    /// pairs.
    #[error("unsupported candidate shape: {0}")]
    InvalidShape(String),

    #[error("finder has no executable path")]
    MissingPath,

    #[error("unable to start finder: {0}")]
    Launch(#[source] io::Error),

    #[error("unable to feed finder input: {0}")]
    Feed(#[source] io::Error),

    #[error("unable to read finder output: {0}")]
    Drain(#[source] io::Error),

    #[error("unable to wait for finder: {0}")]
    Wait(#[source] io::Error),

    #[error("finder exited with {status}")]
    Exit { status: ExitStatus },

    #[error("finder output is not valid UTF-8")]
    InvalidOutput(#[from] FromUtf8Error),

    #[error("installing {name} failed with {status}")]
    Install { name: String, status: ExitStatus },
}

impl Error {
    /// Whether the finder reported that the human cancelled the selection.
    #[must_use]
    pub fn aborted(&self) -> bool {
        matches!(self, Self::Exit { status } if status.code() == Some(ABORT_CODE))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::os::unix::process::ExitStatusExt;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(130, true)]
    #[case(1, false)]
    #[case(2, false)]
    fn aborted_works(#[case] code: i32, #[case] aborted: bool) {
        // Wait statuses carry the exit code in the second byte
        let status = ExitStatus::from_raw(code << 8);
        let error = Error::Exit { status };
        assert_eq!(error.aborted(), aborted);
    }

    #[test]
    fn not_found_names_command() {
        let error = Error::NotFound {
            name: "nope".to_owned(),
        };
        assert_eq!(error.to_string(), "nope: not found");
    }
}
