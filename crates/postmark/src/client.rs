//! HTTP transport to the Postmark API

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::constants::SERVER_TOKEN_HEADER;
use crate::errors::PostmarkError;
use crate::message::Message;
use crate::reply::Reply;

/// Sends messages to Postmark.
///
/// Each call to [`PostmarkClient::send`] makes exactly one request; nothing
/// is retried.
#[derive(Debug, Clone)]
pub struct PostmarkClient {
    client: Client,
    endpoint: Url,
}

impl PostmarkClient {
    /// Create a client for the default Postmark endpoint
    pub fn new() -> Result<Self, PostmarkError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, PostmarkError> {
        let endpoint = config.endpoint_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            PostmarkError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `message` and interprets the response.
    ///
    /// A reply with a non-zero error code comes back as
    /// [`PostmarkError::Remote`], which owns the full reply.
    pub async fn send(&self, message: &Message) -> Result<Reply, PostmarkError> {
        let payload = message.build_payload()?;
        let headers = request_headers(message)?;

        debug!("Sending email via Postmark to: {}", message.to);

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .body(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if let Some(err) = PostmarkError::from_status(status) {
            error!("Postmark rejected email to {}: {}", message.to, err);
            return Err(err);
        }

        let body = response.bytes().await?;
        let reply = decode_reply(&body);

        if !reply.is_success() {
            debug!(
                "Postmark returned error code {}: {}",
                reply.error_code, reply.message
            );
            return Err(PostmarkError::Remote(Box::new(reply)));
        }

        debug!("Email accepted by Postmark: {}", reply.message_id);
        Ok(reply)
    }
}

/// Standard headers first, then custom headers. A custom header replaces
/// any earlier header of the same name.
fn request_headers(message: &Message) -> Result<HeaderMap, PostmarkError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        header_value(USER_AGENT.as_str(), message.user_agent())?,
    );
    headers.insert(
        HeaderName::from_static(SERVER_TOKEN_HEADER),
        header_value(SERVER_TOKEN_HEADER, message.api_key())?,
    );

    for header in message.custom_headers() {
        let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(|_| {
            PostmarkError::InvalidHeader {
                name: header.name.clone(),
            }
        })?;
        headers.insert(name, header_value(&header.name, &header.value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, PostmarkError> {
    HeaderValue::from_str(value).map_err(|_| PostmarkError::InvalidHeader {
        name: name.to_string(),
    })
}

/// An undecodable body yields a zero-valued reply rather than an error
fn decode_reply(body: &[u8]) -> Reply {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!("Failed to parse Postmark reply, using empty reply: {}", e);
        Reply::default()
    })
}
