use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::with_timeout;
use crate::args::FinderArgs;
use crate::args::GlobalArgs;
use crate::cmd::Run;

/// Filter lines from stdin and print the picked ones
#[derive(Debug, Args)]
pub struct RunArgs {
    #[clap(flatten)]
    finder_args: FinderArgs,

    /// Give up and kill the finder after this long
    #[clap(long)]
    timeout: Option<humantime::Duration>,
}

impl Run for RunArgs {
    async fn run(&self, global: &GlobalArgs) -> Result<()> {
        let finder = self.finder_args.finder(global)?;
        debug!(finder = %finder.command_line(), "Filtering stdin");

        let timeout = self.timeout.map(Duration::from);
        let lines = with_timeout(timeout, finder.run()).await??;
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}
