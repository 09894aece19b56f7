use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Args;
use finder::Candidates;
use finder::Selected;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use super::with_timeout;
use crate::args::FinderArgs;
use crate::args::GlobalArgs;
use crate::cmd::Run;

/// Pick from JSON candidates and print what was picked
///
/// Input is either an array of strings, an array of `{"key": ..., "value":
/// ...}` objects, or an object mapping keys to values. Picked values are
/// printed one JSON document per line; picked strings are printed as-is.
#[derive(Debug, Args)]
pub struct SelectArgs {
    #[clap(flatten)]
    finder_args: FinderArgs,

    /// JSON file to read candidates from. Pass `-` to read from stdin.
    #[clap(short, long, default_value = "-")]
    input: Utf8PathBuf,

    /// Give up and kill the finder after this long
    #[clap(long)]
    timeout: Option<humantime::Duration>,
}

impl Run for SelectArgs {
    async fn run(&self, global: &GlobalArgs) -> Result<()> {
        let json = self.read_input().await?;
        let value: Value = serde_json::from_str(&json).context("input is not valid JSON")?;
        let candidates = Candidates::<Value>::try_from(value)?;

        let mut finder = self.finder_args.finder(global)?;
        let timeout = self.timeout.map(Duration::from);
        let selected = with_timeout(timeout, finder.select(&candidates)).await??;

        for selection in selected {
            match selection {
                Selected::Value(value) => println!("{}", serde_json::to_string(&value)?),
                Selected::Line(line) => println!("{line}"),
            }
        }
        Ok(())
    }
}

impl SelectArgs {
    async fn read_input(&self) -> Result<String> {
        if self.input.as_str() == "-" {
            let mut json = String::new();
            tokio::io::stdin()
                .read_to_string(&mut json)
                .await
                .context("unable to read candidates from stdin")?;
            return Ok(json);
        }
        tokio::fs::read_to_string(&self.input)
            .await
            .with_context(|| format!("unable to read candidates from {}", self.input))
    }
}
