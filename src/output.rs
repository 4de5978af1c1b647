//! Payload sink
//!
//! Checkpoints and inventory scans leave the agent as JSON lines, either
//! on stdout or appended to a file. The downstream transport stage is not
//! this crate's concern; the sink is its local stand-in.

use crate::config::{OutputConfig, SinkKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum PayloadWriter {
    Stdout,
    File(PathBuf),
}

impl PayloadWriter {
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        match config.sink {
            SinkKind::Stdout => Ok(Self::Stdout),
            SinkKind::File => {
                let path = config
                    .path
                    .clone()
                    .context("file sink requires output.path")?;
                Ok(Self::File(path))
            }
        }
    }

    /// Serialize `payload` and emit it as one JSON line.
    pub fn write<T: Serialize>(&self, payload: &T) -> Result<()> {
        let line = serde_json::to_string(payload).context("failed to serialize payload")?;
        match self {
            Self::Stdout => {
                println!("{line}");
                Ok(())
            }
            Self::File(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open output file {}", path.display()))?;
                writeln!(file, "{line}")
                    .with_context(|| format!("failed to append to {}", path.display()))
            }
        }
    }
}
