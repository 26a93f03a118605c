//! Process-invocation zone dispatch.
//!
//! Drives a zone by spawning an external control utility per update. The
//! command's exit status is inspected and surfaced; stdio is discarded.

use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::{color::Rgb, config::ZoneCommandCfg, devices::LedZone, error::Error};

/// Placeholder in argv templates replaced with the 6-hex-digit color.
pub const COLOR_PLACEHOLDER: &str = "{color}";

/// LED zone driven through an external command.
pub struct CommandZone {
    cfg: ZoneCommandCfg,
}

impl CommandZone {
    pub fn new(cfg: ZoneCommandCfg) -> Self {
        Self { cfg }
    }

    fn render_args(&self, color: Rgb) -> Vec<String> {
        let hex = format!("{:06x}", color.to_hex());
        self.cfg
            .args
            .iter()
            .map(|arg| arg.replace(COLOR_PLACEHOLDER, &hex))
            .collect()
    }
}

#[async_trait]
impl LedZone for CommandZone {
    fn name(&self) -> &str {
        &self.cfg.name
    }

    async fn apply(&self, color: Rgb) -> Result<(), Error> {
        let args = self.render_args(color);
        debug!(
            "zone '{}': {} {}",
            self.cfg.name,
            self.cfg.program,
            args.join(" ")
        );

        let status = Command::new(&self.cfg.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| Error::DeviceSpawn {
                zone: self.cfg.name.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::DeviceCommand {
                zone: self.cfg.name.clone(),
                code: status.code(),
            })
        }
    }
}
