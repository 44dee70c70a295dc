use std::{collections::HashMap, fs, path::Path, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::connection::{BasicAuth, ConnectOptions, Connection, DEFAULT_CONNECT_TIMEOUT};
use crate::tls::{HostTlsPolicy, TlsSettings};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the Transmission web interface. Example: `http://nas.local:9091`
    #[serde(default = "default_url")]
    pub url: String,

    pub auth: Option<BasicAuth>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Unset means a slow server can hold a request open indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Keyed by hostname
    #[serde(default)]
    pub tls: HashMap<String, HostTls>,
}

#[derive(Debug, Deserialize)]
pub struct HostTls {
    /// PEM file with an extra trusted root
    pub ca_cert: Option<PathBuf>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_url() -> String {
    "http://localhost:9091".to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
            tls: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn connect_options(&self) -> Result<ConnectOptions> {
        let mut policy = HostTlsPolicy::new();
        for (host, tls) in &self.tls {
            let mut settings = TlsSettings {
                accept_invalid_certs: tls.accept_invalid_certs,
                ..Default::default()
            };
            if let Some(path) = &tls.ca_cert {
                let pem = fs::read(path)
                    .with_context(|| format!("failed to read CA certificate {}", path.display()))?;
                let certificate = reqwest::Certificate::from_pem(&pem)
                    .with_context(|| format!("invalid CA certificate {}", path.display()))?;
                settings.root_certificates.push(certificate);
            }
            policy.insert(host.as_str(), settings);
        }

        Ok(ConnectOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            auth: self.auth.clone(),
            tls: Arc::new(policy),
        })
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(Connection::with_options(&self.url, self.connect_options()?)?)
    }
}
