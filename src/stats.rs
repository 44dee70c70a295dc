use std::fmt;

use serde::Deserialize;

use crate::connection::Connection;
use crate::error::Result;
use crate::rpc;

/// Generic counters of a Transmission session, speeds in bytes per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Statistics {
    #[serde(rename = "downloadSpeed", alias = "DownloadSpeed")]
    pub download_speed: u64,
    #[serde(rename = "uploadSpeed", alias = "UploadSpeed")]
    pub upload_speed: u64,
    #[serde(rename = "torrentCount", alias = "TorrentCount")]
    pub torrent_count: u64,
    #[serde(rename = "activeTorrentCount", alias = "ActiveTorrentCount")]
    pub active_torrent_count: u64,
    #[serde(
        rename = "pausedTorrentCount",
        alias = "PausedTorrentCount",
        alias = "PausedTorrentcount"
    )]
    pub paused_torrent_count: u64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} KB/s DL, {} KB/s UL, {} torrents ({} active, {} paused)",
            self.download_speed / 1024,
            self.upload_speed / 1024,
            self.torrent_count,
            self.active_torrent_count,
            self.paused_torrent_count
        )
    }
}

impl Connection {
    pub async fn stats(&self) -> Result<Statistics> {
        let body = self.call::<()>("session-stats", None).await?;
        rpc::decode(&body)
    }
}
