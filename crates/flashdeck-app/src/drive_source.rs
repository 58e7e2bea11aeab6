//! Drive list feed
//!
//! Drives come from a JSON file (an array of drive objects, camelCase keys)
//! or from a built-in demo list. A background task re-reads the source on an
//! interval and posts the result to the UI loop; only plain data crosses the
//! channel.

use std::path::{Path, PathBuf};
use std::time::Duration;

use flashdeck_core::prelude::*;
use flashdeck_core::Drive;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::message::Message;

/// Where drives are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveSource {
    File(PathBuf),
    Demo,
}

impl DriveSource {
    pub async fn scan(&self) -> Result<Vec<Drive>> {
        match self {
            DriveSource::File(path) => load_drive_list(path).await,
            DriveSource::Demo => Ok(demo_drives()),
        }
    }
}

impl std::fmt::Display for DriveSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveSource::File(path) => write!(f, "{}", path.display()),
            DriveSource::Demo => f.write_str("demo drives"),
        }
    }
}

/// Read and parse a drive list file
pub async fn load_drive_list(path: &Path) -> Result<Vec<Drive>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::DriveListNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    parse_drive_list(&content)
}

pub fn parse_drive_list(content: &str) -> Result<Vec<Drive>> {
    serde_json::from_str(content)
        .map_err(|e| Error::drive_source(format!("Invalid drive list: {}", e)))
}

/// A fixed set of drives covering every eligibility status
pub fn demo_drives() -> Vec<Drive> {
    vec![
        Drive::new("/dev/sdb", "SanDisk Ultra", "/dev/sdb")
            .with_size(16_013_942_784)
            .with_mountpoint("/media/sandisk"),
        Drive::new("/dev/sdc", "Kingston DataTraveler", "/dev/sdc").with_size(31_406_948_352),
        Drive::new("/dev/sdd", "Generic SD Card", "/dev/sdd")
            .with_size(7_948_206_080)
            .read_only(),
        Drive::new("/dev/sde", "WD Elements", "/dev/sde").with_size(2_000_365_289_472),
        Drive::new("/dev/nvme0n1", "Samsung SSD 970 EVO", "/dev/nvme0n1")
            .with_size(500_107_862_016)
            .with_mountpoint("/")
            .system(),
    ]
}

/// Poll `source` every `interval` until `shutdown_rx` flips to `true`.
///
/// Sends [`Message::DrivesScanned`] when the list differs from the last one
/// sent and [`Message::DriveScanFailed`] when a scan starts failing with a
/// new error. The first successful scan is always sent.
pub fn spawn_drive_poller(
    source: DriveSource,
    interval: Duration,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_drives: Option<Vec<Drive>> = None;
        let mut last_error: Option<String> = None;

        info!("Watching {} every {:?}", source, interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let message = match source.scan().await {
                        Ok(drives) => {
                            last_error = None;
                            if last_drives.as_ref() == Some(&drives) {
                                continue;
                            }
                            last_drives = Some(drives.clone());
                            Message::DrivesScanned { drives }
                        }
                        Err(e) => {
                            let error = e.to_string();
                            if last_error.as_ref() == Some(&error) {
                                continue;
                            }
                            warn!("Drive scan failed: {}", error);
                            last_error = Some(error.clone());
                            Message::DriveScanFailed { error }
                        }
                    };

                    if msg_tx.send(message).await.is_err() {
                        debug!("Message channel closed, stopping drive poller");
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Drive poller shutting down");
                        break;
                    }
                }
            }
        }
    })
}

/// Scan once and post the result, regardless of what was sent before
pub fn spawn_rescan(source: DriveSource, msg_tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let message = match source.scan().await {
            Ok(drives) => Message::DrivesScanned { drives },
            Err(e) => Message::DriveScanFailed {
                error: e.to_string(),
            },
        };
        if msg_tx.send(message).await.is_err() {
            debug!("Message channel closed, dropping drive rescan result");
        }
    })
}
