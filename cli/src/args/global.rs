use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Args;
use finder::Resolver;
use finder::Shell;
use tracing::debug;
use tracing_glog::Glog;
use tracing_glog::GlogFields;
use tracing_glog::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

const HEADING: Option<&str> = Some("Global Options");

const XDG_DATA_HOME: &str = "XDG_DATA_HOME";

/// Global arguments that apply to every subcommand.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Filter directive for stderr logs
    #[clap(long, env = "RUST_LOG", default_value = "error", help_heading = HEADING, global = true)]
    pub log_level: String,

    /// Shell the finder is launched through
    #[clap(long, env = "SHELL", default_value = "sh", help_heading = HEADING, global = true)]
    pub shell: Utf8PathBuf,
}

impl GlobalArgs {
    /// Initializes all [`tracing`] config.
    ///
    /// Logs share stderr with the finder's interface, so keep the default
    /// level quiet.
    pub fn init_tracing(&self) -> Result<()> {
        let stderr_filter = EnvFilter::builder().parse_lossy(&self.log_level);
        let stderr_layer = tracing_subscriber::fmt::layer()
            .event_format(Glog::default().with_timer(LocalTime::default()))
            .fmt_fields(GlogFields::default())
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .with_filter(stderr_filter);

        let subscriber = Registry::default().with(stderr_layer);
        tracing::subscriber::set_global_default(subscriber)?;

        debug!("Initialized tracing");

        Ok(())
    }

    pub fn shell(&self) -> Shell {
        Shell::new(self.shell.clone())
    }

    /// Resolver using the built-in presets, `PATH` and the configured shell.
    pub fn resolver(&self) -> Resolver {
        Resolver::builder().shell(self.shell()).build()
    }
}

/// Default directory finders get installed into.
///
/// Follows these rules:
///
/// - XDG base directory (all platforms if environment variable is set)
/// - Platform-specific well known directory (see [`dirs`])
/// - Home directory
/// - Current directory
pub fn data_dir() -> Option<PathBuf> {
    let name = env!("CARGO_BIN_NAME");
    if let Some(path) = env::var_os(XDG_DATA_HOME).filter(|p| !p.is_empty()) {
        Some(PathBuf::from(path).join(name))
    } else if let Some(path) = dirs::data_dir() {
        Some(path.join(name))
    } else if let Some(path) = dirs::home_dir() {
        Some(path.join(format!(".{name}")))
    } else {
        env::current_dir().ok().map(|path| path.join(format!(".{name}")))
    }
}
