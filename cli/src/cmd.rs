mod install;
mod run;
mod select;
mod which;

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use enum_dispatch::enum_dispatch;

use crate::args::GlobalArgs;

/// Pick lines and values with an interactive finder
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    global_args: GlobalArgs,
}

/// Subcommands must implement [`Run`] to be executed at runtime.
#[enum_dispatch]
pub trait Run {
    async fn run(&self, global: &GlobalArgs) -> Result<()>;
}

#[enum_dispatch(Run)]
#[derive(Debug, Subcommand)]
enum Command {
    Which(which::WhichArgs),
    Run(run::RunArgs),
    Select(select::SelectArgs),
    Install(install::InstallArgs),
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.global_args.init_tracing()?;

    cli.command.run(&cli.global_args).await
}

/// Awaits `future`, giving up after `timeout` if one is set.
///
/// Dropping a running finder kills it, so expiry does not leave it behind.
async fn with_timeout<T>(
    timeout: Option<Duration>,
    future: impl Future<Output = T>,
) -> Result<T> {
    match timeout {
        Some(duration) => tokio::time::timeout(duration, future)
            .await
            .context("finder timed out"),
        None => Ok(future.await),
    }
}
