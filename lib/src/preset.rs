//! Known finders and their per-tool behaviour.

mod fzf;
mod fzy;
mod peco;
mod percol;
mod skim;

use async_trait::async_trait;
use camino::Utf8Path;
use enum_dispatch::enum_dispatch;
use strum::Display;
use strum::EnumString;
use strum::IntoStaticStr;
use tracing::debug;

pub use self::fzf::Fzf;
pub use self::fzy::Fzy;
pub use self::peco::Peco;
pub use self::percol::Percol;
pub use self::skim::Skim;
use crate::shell::quote;
use crate::Error;
use crate::Result;
use crate::Shell;

/// Names of the finders this crate knows about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PresetKind {
    Fzf,
    Sk,
    Fzy,
    Peco,
    Percol,
}

/// Static knowledge about one finder tool.
#[async_trait]
#[enum_dispatch]
pub trait Preset {
    // Required

    /// Which tool this is. The executable has the same name.
    fn kind(&self) -> PresetKind;

    // Defaults

    /// Arguments used when the caller did not pick the finder explicitly.
    fn default_args(&self) -> Vec<String> {
        Vec::new()
    }

    /// Fetches or builds the executable into `dir`.
    ///
    /// By default this does nothing. Override this if the tool can be
    /// installed automatically.
    async fn install(&self, _shell: &Shell, _dir: &Utf8Path) -> Result<()> {
        Ok(())
    }
}

#[enum_dispatch(Preset)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetImpl {
    Fzf(Fzf),
    Skim(Skim),
    Fzy(Fzy),
    Peco(Peco),
    Percol(Percol),
}

impl PresetImpl {
    /// Executable name, which is also the lookup key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().into()
    }

    /// Finds the preset registered under `name`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse::<PresetKind>().ok().map(Self::from)
    }
}

impl From<PresetKind> for PresetImpl {
    fn from(kind: PresetKind) -> Self {
        match kind {
            PresetKind::Fzf => Fzf.into(),
            PresetKind::Sk => Skim.into(),
            PresetKind::Fzy => Fzy.into(),
            PresetKind::Peco => Peco.into(),
            PresetKind::Percol => Percol.into(),
        }
    }
}

/// Runs an install script for `name` with inherited stdio, after making sure
/// `dir` exists. Occurrences of `{dir}` in `script` are replaced with the
/// quoted directory.
async fn run_script(shell: &Shell, name: &str, dir: &Utf8Path, script: &str) -> Result<()> {
    let dir = quote(dir.as_str());
    let line = format!("mkdir -p {dir} && {}", script.replace("{dir}", &dir));
    debug!(%name, %line, "Installing finder");

    let status = shell
        .command(&line)
        .status()
        .await
        .map_err(Error::Launch)?;
    if !status.success() {
        return Err(Error::Install {
            name: name.to_owned(),
            status,
        });
    }
    Ok(())
}
