use async_trait::async_trait;
use camino::Utf8Path;

use super::run_script;
use super::Preset;
use super::PresetKind;
use crate::Result;
use crate::Shell;

/// <https://github.com/peco/peco>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Peco;

#[async_trait]
impl Preset for Peco {
    fn kind(&self) -> PresetKind {
        PresetKind::Peco
    }

    async fn install(&self, shell: &Shell, dir: &Utf8Path) -> Result<()> {
        let script = "GOBIN={dir} go install github.com/peco/peco/cmd/peco@latest";
        run_script(shell, "peco", dir, script).await
    }
}
