use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Args;
use finder::preset::Preset;
use finder::preset::PresetImpl;

use crate::args::data_dir;
use crate::args::GlobalArgs;
use crate::cmd::Run;

/// Install a known finder
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Finder to install: fzf, sk, fzy, peco or percol
    #[clap(default_value = "fzf")]
    name: String,

    /// Directory to install into. Defaults to `bin` in the data directory.
    #[clap(long)]
    dir: Option<Utf8PathBuf>,
}

impl Run for InstallArgs {
    async fn run(&self, global: &GlobalArgs) -> Result<()> {
        let preset = PresetImpl::from_name(&self.name)
            .with_context(|| format!("no install recipe for {}", self.name))?;
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => default_dir()?,
        };

        preset.install(&global.shell(), &dir).await?;
        println!("{}", dir.join(preset.name()));
        Ok(())
    }
}

fn default_dir() -> Result<Utf8PathBuf> {
    let dir = data_dir().context("unable to find a data directory")?;
    let dir = Utf8PathBuf::try_from(dir).context("data directory is not valid UTF-8")?;
    Ok(dir.join("bin"))
}
