use async_trait::async_trait;
use camino::Utf8Path;

use super::run_script;
use super::Preset;
use super::PresetKind;
use crate::Result;
use crate::Shell;

const DEFAULT_ARGS: [&str; 4] = ["--reverse", "--height=50%", "--ansi", "--multi"];

/// <https://github.com/junegunn/fzf>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fzf;

#[async_trait]
impl Preset for Fzf {
    fn kind(&self) -> PresetKind {
        PresetKind::Fzf
    }

    fn default_args(&self) -> Vec<String> {
        DEFAULT_ARGS.map(String::from).to_vec()
    }

    async fn install(&self, shell: &Shell, dir: &Utf8Path) -> Result<()> {
        let script = "git clone --depth 1 https://github.com/junegunn/fzf.git {dir}/.fzf \
                      && {dir}/.fzf/install --bin \
                      && cp {dir}/.fzf/bin/fzf {dir}/fzf";
        run_script(shell, "fzf", dir, script).await
    }
}
