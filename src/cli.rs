//! Command-line interface

use crate::inventory::ScanCategory;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hostscout",
    version,
    about = "Host inventory and telemetry agent"
)]
pub struct AgentArgs {
    /// Path to the configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Collect a single checkpoint and exit
    #[arg(long)]
    pub once: bool,

    /// Run a full hardware inventory scan and exit
    #[arg(long)]
    pub inventory: bool,

    /// Scan a single category, annotated with catalog identities, and exit
    #[arg(long, value_enum, value_name = "CATEGORY")]
    pub scan: Option<ScanCategory>,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH")]
    pub gen_config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl AgentArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
