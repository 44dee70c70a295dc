use reqwest::{header::HeaderMap, Method};

use crate::connection::Connection;
use crate::error::{Error, Result};

pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// The anti-CSRF token Transmission hands out on a rejected request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Connection {
    /// Probes the RPC endpoint with a bare GET. Transmission refuses it and
    /// answers with the current session id, which is all we keep.
    pub async fn session_token(&self) -> Result<SessionToken> {
        let response = self.request(Method::GET).send().await?;
        log::debug!("session probe answered with {}", response.status());
        token_from_headers(response.headers())
    }
}

/// Tokens are taken byte for byte. Transmission only issues ASCII ids, so a
/// value with non-ASCII bytes is rejected as malformed instead of being
/// lossily converted.
fn token_from_headers(headers: &HeaderMap) -> Result<SessionToken> {
    match headers.get(SESSION_ID_HEADER) {
        Some(value) if !value.is_empty() => value
            .to_str()
            .map(|token| SessionToken(token.to_string()))
            .map_err(|_| Error::Session("malformed token".to_string())),
        _ => Err(Error::Session("missing token".to_string())),
    }
}
