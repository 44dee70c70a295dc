use std::{collections::HashMap, fmt};

use reqwest::{Certificate, ClientBuilder};

/// Trust settings applied to the HTTP client for one remote host.
#[derive(Clone, Default)]
pub struct TlsSettings {
    /// Extra roots trusted on top of the bundled web PKI roots.
    pub root_certificates: Vec<Certificate>,
    /// Skip certificate verification entirely. Only meant for a box on the
    /// local network serving a self-signed certificate.
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for TlsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsSettings")
            .field("root_certificates", &self.root_certificates.len())
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl TlsSettings {
    pub(crate) fn apply(self, mut builder: ClientBuilder) -> ClientBuilder {
        for certificate in self.root_certificates {
            builder = builder.add_root_certificate(certificate);
        }
        if self.accept_invalid_certs {
            log::warn!("certificate verification is disabled for this connection");
        }
        builder.danger_accept_invalid_certs(self.accept_invalid_certs)
    }
}

/// Chooses TLS settings for a hostname.
pub trait TlsPolicy: Send + Sync {
    fn settings_for(&self, host: &str) -> TlsSettings;
}

/// Web PKI roots only, for every host.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTls;

impl TlsPolicy for DefaultTls {
    fn settings_for(&self, _host: &str) -> TlsSettings {
        TlsSettings::default()
    }
}

/// Per-host overrides, falling back to the defaults for unknown hosts.
#[derive(Clone, Debug, Default)]
pub struct HostTlsPolicy {
    hosts: HashMap<String, TlsSettings>,
}

impl HostTlsPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, host: impl Into<String>, settings: TlsSettings) {
        self.hosts.insert(host.into().to_ascii_lowercase(), settings);
    }
}

impl TlsPolicy for HostTlsPolicy {
    fn settings_for(&self, host: &str) -> TlsSettings {
        self.hosts
            .get(&host.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}
