use std::env;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use tracing::trace;

/// Finds executables on a `PATH`-style search path.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    paths: Option<OsString>,
}

impl Locator {
    /// Searches the given colon-separated directory list.
    pub fn new(paths: impl Into<OsString>) -> Self {
        Self {
            paths: Some(paths.into()),
        }
    }

    /// Searches this process's `PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            paths: env::var_os("PATH"),
        }
    }

    /// Resolves `name` to an executable path.
    ///
    /// Names containing a slash are checked as-is instead of being searched
    /// for. Paths that are not valid UTF-8 are skipped, since they end up in a
    /// shell command line.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Utf8PathBuf> {
        if name.is_empty() {
            return None;
        }
        if name.contains('/') {
            return Some(Path::new(name))
                .filter(|path| is_executable(path))
                .and_then(|path| Utf8PathBuf::from_path_buf(path.to_path_buf()).ok());
        }

        let paths = self.paths.as_ref()?;
        for dir in env::split_paths(paths) {
            let dir = if dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                dir
            };
            let candidate = dir.join(name);
            trace!(path = %candidate.display(), "Locator: checking");
            if is_executable(&candidate) {
                if let Ok(path) = Utf8PathBuf::from_path_buf(candidate) {
                    return Some(path);
                }
            }
        }
        None
    }
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
