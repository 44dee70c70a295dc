use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::session::SESSION_ID_HEADER;

const SUCCESS: &str = "success";

#[derive(Serialize)]
pub struct Request<'a, A> {
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<&'a A>,
}

#[derive(Deserialize)]
struct Envelope {
    result: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

impl Connection {
    /// Sends one RPC and returns the raw body. A new session token is fetched
    /// for every call, so two round trips are paid each time.
    pub async fn call<A: Serialize>(&self, method: &str, arguments: Option<&A>) -> Result<Bytes> {
        let token = self.session_token().await?;
        let body = serde_json::to_vec(&Request { method, arguments }).map_err(Error::Encoding)?;

        log::debug!("calling {} ({} bytes)", method, body.len());
        let response = self
            .request(Method::POST)
            .header(SESSION_ID_HEADER, token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(Error::Session("session token rejected".to_string()));
        }
        // Any other error status (a proxy's 401, a 5xx) fails here and its
        // body is dropped rather than handed to the decoder.
        let response = response.error_for_status()?;
        Ok(response.bytes().await?)
    }
}

/// Checks the envelope status and decodes the method specific arguments.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(Error::Decoding)?;
    if envelope.result != SUCCESS {
        return Err(Error::Operation(envelope.result));
    }
    serde_json::from_value(envelope.arguments).map_err(Error::Decoding)
}
