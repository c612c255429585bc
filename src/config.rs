use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

use crate::util::{get_default_host, get_default_port, get_workdir};

/// Command line options of the plugin
#[derive(Debug, Clone, Parser)]
#[command(name = "mackerel-plugin-epgstation", version, about = "EPGStation metrics plugin for mackerel-agent")]
pub struct Options {
    /// EPGStation host
    #[arg(long, default_value_t = get_default_host())]
    pub host: String,

    /// EPGStation port
    #[arg(long, default_value_t = get_default_port())]
    pub port: u16,

    /// Metric key prefix
    #[arg(long, default_value = "epgstation")]
    pub prefix: String,

    /// Temp filename
    #[arg(long)]
    pub tempfile: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Options {
    /// Path of the last-value cache, falling back to `mackerel-plugin-{prefix}` in the workdir.
    pub fn tempfile_path(&self) -> PathBuf {
        self.tempfile
            .clone()
            .unwrap_or_else(|| get_workdir().join(format!("mackerel-plugin-{}", self.prefix)))
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
