use async_trait::async_trait;
use camino::Utf8Path;

use super::run_script;
use super::Preset;
use super::PresetKind;
use crate::Result;
use crate::Shell;

// Skim accepts the fzf flags we care about
const DEFAULT_ARGS: [&str; 4] = ["--reverse", "--height=50%", "--ansi", "--multi"];

/// <https://github.com/skim-rs/skim>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Skim;

#[async_trait]
impl Preset for Skim {
    fn kind(&self) -> PresetKind {
        PresetKind::Sk
    }

    fn default_args(&self) -> Vec<String> {
        DEFAULT_ARGS.map(String::from).to_vec()
    }

    async fn install(&self, shell: &Shell, dir: &Utf8Path) -> Result<()> {
        let script = "cargo install --locked --root {dir}/.skim skim \
                      && cp {dir}/.skim/bin/sk {dir}/sk";
        run_script(shell, "sk", dir, script).await
    }
}
