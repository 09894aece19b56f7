use bon::Builder;
use camino::Utf8PathBuf;
use tracing::debug;

use crate::preset::Fzf;
use crate::preset::Fzy;
use crate::preset::Peco;
use crate::preset::Percol;
use crate::preset::Preset;
use crate::preset::PresetImpl;
use crate::preset::Skim;
use crate::Error;
use crate::Finder;
use crate::Locator;
use crate::Result;
use crate::Shell;

/// Ordered list of presets tried when no finder is named explicitly.
///
/// Order is priority, not alphabetical: earlier presets win when several are
/// installed.
#[derive(Debug, Clone)]
pub struct Registry {
    presets: Vec<PresetImpl>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
            .with(Fzf)
            .with(Skim)
            .with(Fzy)
            .with(Peco)
            .with(Percol)
    }
}

impl Registry {
    /// An empty registry. See [`Registry::default`] for the built-in one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, preset: impl Into<PresetImpl>) -> Self {
        self.presets.push(preset.into());
        self
    }

    #[must_use]
    pub fn presets(&self) -> &[PresetImpl] {
        &self.presets
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PresetImpl> {
        self.presets.iter().find(|preset| preset.name() == name)
    }

    /// Returns the first preset whose executable `locator` can find.
    ///
    /// # Errors
    ///
    /// If none of the presets is installed.
    pub fn lookup(&self, locator: &Locator) -> Result<(PresetImpl, Utf8PathBuf)> {
        self.presets
            .iter()
            .find_map(|preset| locator.find(preset.name()).map(|path| (*preset, path)))
            .ok_or(Error::NoAvailableCommand)
    }
}

/// Turns a requested command, or the lack of one, into a [`Finder`].
///
/// Resolution only searches the filesystem; nothing is started.
#[derive(Debug, Clone, Builder)]
pub struct Resolver {
    #[builder(default)]
    registry: Registry,
    #[builder(default = Locator::from_env())]
    locator: Locator,
    #[builder(default = Shell::from_env())]
    shell: Shell,
}

impl Resolver {
    /// Built-in registry, `PATH` and `SHELL` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::builder().build()
    }

    /// Resolves `args` into a finder reading from this process's stdin.
    ///
    /// An empty `args` picks the first installed registry preset along with
    /// its default arguments. Otherwise the first element is the command to
    /// locate and the remaining elements are its arguments.
    ///
    /// # Errors
    ///
    /// - If the named command cannot be found
    /// - If no command is named and no preset is installed
    pub fn resolve<I, S>(&self, args: I) -> Result<Finder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let Some(name) = args.next() else {
            let (preset, path) = self.registry.lookup(&self.locator)?;
            debug!(name = preset.name(), %path, "Resolved default finder");
            let finder = Finder::builder()
                .name(preset.name())
                .args(preset.default_args())
                .path(path)
                .shell(self.shell.clone())
                .build();
            return Ok(finder);
        };

        let path = self
            .locator
            .find(&name)
            .ok_or_else(|| Error::NotFound { name: name.clone() })?;
        debug!(%name, %path, "Resolved requested finder");
        let finder = Finder::builder()
            .name(name)
            .args(args.collect())
            .path(path)
            .shell(self.shell.clone())
            .build();
        Ok(finder)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::locate::tests::bin_dir;
    use crate::source::SourceImpl;

    fn resolver(files: &[&str]) -> (tempfile::TempDir, Resolver) {
        let dir = bin_dir(files);
        let resolver = Resolver::builder()
            .locator(Locator::new(dir.path()))
            .shell(Shell::default())
            .build();
        (dir, resolver)
    }

    #[test]
    fn default_order() {
        let names: Vec<_> = Registry::default()
            .presets()
            .iter()
            .map(PresetImpl::name)
            .collect();
        assert_eq!(names, ["fzf", "sk", "fzy", "peco", "percol"]);
    }

    #[rstest]
    #[case(&["fzf", "sk", "fzy", "peco", "percol"], "fzf")]
    #[case(&["percol", "fzf"], "fzf")]
    #[case(&["peco", "fzy"], "fzy")]
    #[case(&["percol"], "percol")]
    #[case(&["-fzf", "peco"], "peco")]
    fn lookup_prefers_priority(#[case] files: &[&str], #[case] expected: &str) {
        let (dir, resolver) = resolver(files);
        let finder = resolver.resolve(Vec::<String>::new()).unwrap();
        assert_eq!(finder.name(), expected);
        assert_eq!(finder.path().as_std_path(), dir.path().join(expected));
        assert!(matches!(finder.source(), SourceImpl::Stdin(_)));
    }

    #[test]
    fn lookup_uses_default_args() {
        let (_dir, resolver) = resolver(&["fzf"]);
        let finder = resolver.resolve(Vec::<String>::new()).unwrap();
        assert_eq!(
            finder.args(),
            ["--reverse", "--height=50%", "--ansi", "--multi"]
        );
    }

    #[rstest]
    #[case(&[])]
    #[case(&["dmenu", "rofi"])]
    #[case(&["-fzf"])]
    fn lookup_without_presets_fails(#[case] files: &[&str]) {
        let (_dir, resolver) = resolver(files);
        let error = resolver.resolve(Vec::<String>::new()).unwrap_err();
        assert!(matches!(error, Error::NoAvailableCommand), "{error:?}");
    }

    #[test]
    fn explicit_command_keeps_args() {
        let (dir, resolver) = resolver(&["fzf", "peco"]);
        let finder = resolver.resolve(["peco", "--layout", "bottom-up"]).unwrap();
        assert_eq!(finder.name(), "peco");
        assert_eq!(finder.args(), ["--layout", "bottom-up"]);
        assert_eq!(finder.path().as_std_path(), dir.path().join("peco"));
        assert!(matches!(finder.source(), SourceImpl::Stdin(_)));
    }

    #[test]
    fn explicit_command_without_args_gets_none() {
        let (_dir, resolver) = resolver(&["fzf"]);
        let finder = resolver.resolve(["fzf"]).unwrap();
        assert!(finder.args().is_empty());
    }

    #[test]
    fn explicit_missing_command_is_named() {
        let (_dir, resolver) = resolver(&["fzf"]);
        let error = resolver.resolve(["skim-nightly"]).unwrap_err();
        assert!(
            matches!(&error, Error::NotFound { name } if name == "skim-nightly"),
            "{error:?}"
        );
        assert_eq!(error.to_string(), "skim-nightly: not found");
    }

    #[test]
    fn registry_get_works() {
        let registry = Registry::new().with(Peco);
        assert!(registry.get("peco").is_some());
        assert!(registry.get("fzf").is_none());
    }
}
