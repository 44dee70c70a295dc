//! Client for the Transmission RPC interface.
//!
//! Every call probes the server for a fresh `X-Transmission-Session-Id` before
//! posting the JSON request, so no session state is kept between calls.

pub mod config;
pub mod connection;
pub mod error;
pub mod rpc;
pub mod session;
pub mod stats;
pub mod tls;
pub mod torrent;

pub use config::Config;
pub use connection::{BasicAuth, ConnectOptions, Connection};
pub use error::{Error, Result};
pub use session::SessionToken;
pub use stats::Statistics;
pub use tls::{DefaultTls, HostTlsPolicy, TlsPolicy, TlsSettings};
pub use torrent::{AddedTorrent, TorrentAdd};
