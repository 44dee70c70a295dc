use std::{fmt, sync::Arc, time::Duration};

use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::tls::{DefaultTls, TlsPolicy};

const RPC_PATH: [&str; 2] = ["transmission", "rpc"];

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Deserialize)]
pub struct BasicAuth {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct ConnectOptions {
    /// Bounds TCP and TLS establishment only.
    pub connect_timeout: Duration,
    /// End-to-end bound on a single request, response body included.
    pub request_timeout: Option<Duration>,
    pub auth: Option<BasicAuth>,
    pub tls: Arc<dyn TlsPolicy>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
            auth: None,
            tls: Arc::new(DefaultTls),
        }
    }
}

/// A handle on one Transmission instance. Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct Connection {
    client: Client,
    rpc_url: Url,
    auth: Option<BasicAuth>,
}

impl Connection {
    pub fn connect(endpoint: &str) -> Result<Self> {
        Self::with_options(endpoint, ConnectOptions::default())
    }

    pub fn with_options(endpoint: &str, options: ConnectOptions) -> Result<Self> {
        let rpc_url = rpc_url(endpoint)?;
        let host = rpc_url.host_str().unwrap_or_default();

        let mut builder = Client::builder().connect_timeout(options.connect_timeout);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder = options.tls.settings_for(host).apply(builder);
        let client = builder.build()?;

        log::debug!("prepared transmission connection to {}", rpc_url);
        Ok(Self {
            client,
            rpc_url,
            auth: options.auth,
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub(crate) fn request(&self, method: Method) -> RequestBuilder {
        let builder = self.client.request(method, self.rpc_url.clone());
        match &self.auth {
            Some(auth) => builder.basic_auth(&auth.user, Some(&auth.password)),
            None => builder,
        }
    }
}

fn rpc_url(endpoint: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let mut url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(RPC_PATH);
    Ok(url)
}
