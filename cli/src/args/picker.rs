use anyhow::Context;
use anyhow::Result;
use clap::Args;
use finder::Finder;

use super::GlobalArgs;

const HEADING: Option<&str> = Some("Finder Options");

/// Arguments for choosing the finder to run.
#[derive(Debug, Args, Clone)]
pub struct FinderArgs {
    /// Finder command followed by its arguments. Defaults to the first
    /// installed of fzf, sk, fzy, peco and percol.
    #[clap(trailing_var_arg = true, allow_hyphen_values = true, help_heading = HEADING)]
    pub command: Vec<String>,
}

impl FinderArgs {
    pub fn finder(&self, global: &GlobalArgs) -> Result<Finder> {
        global
            .resolver()
            .resolve(self.command.iter().cloned())
            .context("unable to resolve a finder")
    }
}
