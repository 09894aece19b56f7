use async_trait::async_trait;
use camino::Utf8Path;

use super::run_script;
use super::Preset;
use super::PresetKind;
use crate::Result;
use crate::Shell;

/// <https://github.com/jhawthorn/fzy>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fzy;

#[async_trait]
impl Preset for Fzy {
    fn kind(&self) -> PresetKind {
        PresetKind::Fzy
    }

    async fn install(&self, shell: &Shell, dir: &Utf8Path) -> Result<()> {
        let script = "git clone --depth 1 https://github.com/jhawthorn/fzy.git {dir}/.fzy \
                      && make -C {dir}/.fzy \
                      && cp {dir}/.fzy/fzy {dir}/fzy";
        run_script(shell, "fzy", dir, script).await
    }
}
