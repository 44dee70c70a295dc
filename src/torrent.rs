use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::rpc;

/// Arguments of `torrent-add`: either something Transmission fetches itself
/// (magnet link or torrent URL) or the base64 content of a .torrent file.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum TorrentAdd {
    File {
        filename: String,
        paused: bool,
        #[serde(rename = "download-dir", skip_serializing_if = "Option::is_none")]
        download_dir: Option<String>,
    },
    Metainfo {
        metainfo: String,
        paused: bool,
        #[serde(rename = "download-dir", skip_serializing_if = "Option::is_none")]
        download_dir: Option<String>,
    },
}

impl TorrentAdd {
    pub fn url(url: impl Into<String>) -> Self {
        TorrentAdd::File {
            filename: url.into(),
            paused: false,
            download_dir: None,
        }
    }

    pub fn metainfo(contents: &[u8]) -> Self {
        TorrentAdd::Metainfo {
            metainfo: STANDARD.encode(contents),
            paused: false,
            download_dir: None,
        }
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read(path).await?;
        Ok(Self::metainfo(&contents))
    }

    pub fn download_dir(mut self, dir: impl Into<String>) -> Self {
        match &mut self {
            TorrentAdd::File { download_dir, .. } | TorrentAdd::Metainfo { download_dir, .. } => {
                *download_dir = Some(dir.into())
            }
        }
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AddedTorrent {
    #[serde(default, rename = "id", alias = "Id")]
    pub id: i64,
    #[serde(default, rename = "name", alias = "Name")]
    pub name: String,
    #[serde(default, rename = "hashString", alias = "HashString")]
    pub hash_string: String,
}

#[derive(Deserialize)]
struct TorrentAdded {
    #[serde(default, rename = "torrent-added")]
    torrent_added: AddedTorrent,
}

fn parse_added(body: &[u8]) -> Result<AddedTorrent> {
    let added = rpc::decode::<TorrentAdded>(body)?.torrent_added;
    // Transmission can answer success without actually adding anything.
    if added.name.is_empty() {
        return Err(Error::Operation("empty result".to_string()));
    }
    Ok(added)
}

impl Connection {
    pub async fn add(&self, torrent: &TorrentAdd) -> Result<AddedTorrent> {
        let body = self.call("torrent-add", Some(torrent)).await?;
        let added = parse_added(&body)?;
        log::debug!("added torrent #{} {} ({})", added.id, added.name, added.hash_string);
        Ok(added)
    }

    /// Adds a torrent by magnet link or URL and returns its display name.
    pub async fn add_torrent(&self, url: &str) -> Result<String> {
        Ok(self.add(&TorrentAdd::url(url)).await?.name)
    }

    /// Uploads a local .torrent file and returns its display name.
    pub async fn add_torrent_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let torrent = TorrentAdd::from_file(path).await?;
        Ok(self.add(&torrent).await?.name)
    }
}
