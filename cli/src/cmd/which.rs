use anyhow::Result;
use clap::Args;

use crate::args::FinderArgs;
use crate::args::GlobalArgs;
use crate::cmd::Run;

/// Show which finder would be run
#[derive(Debug, Args)]
pub struct WhichArgs {
    #[clap(flatten)]
    finder_args: FinderArgs,
}

impl Run for WhichArgs {
    async fn run(&self, global: &GlobalArgs) -> Result<()> {
        let finder = self.finder_args.finder(global)?;
        println!("{} -c {:?}", finder.shell().path(), finder.command_line());
        Ok(())
    }
}
