/*!
 * HTTP client for the public lyrics database.
 *
 * Two operations: requesting a proof-of-work challenge and publishing a
 * solved submission. Error responses carry a human-readable `message`
 * field which is surfaced verbatim to the user; malformed bodies and
 * transport failures collapse into generic failure messages rather than
 * leaking low-level errors.
 */

use std::time::Duration;

use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::challenge::Challenge;
use crate::errors::ApiError;

/// Default public endpoint of the lyrics database publish API
pub const DEFAULT_ENDPOINT: &str = "https://lrclib.net/api";

/// Header carrying the `{prefix}:{nonce}` publish token
const PUBLISH_TOKEN_HEADER: &str = "X-Publish-Token";

/// Body of a publish request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Track title
    pub track_name: String,

    /// Artist name
    pub artist_name: String,

    /// Album name, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,

    /// Track duration in seconds, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    /// Unsynchronized lyric text
    pub plain_lyrics: String,

    /// Synchronized LRC text
    pub synced_lyrics: String,
}

/// Error body returned by the API on failure
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the lyrics database publish API
#[derive(Debug, Clone)]
pub struct LyricsDbClient {
    /// HTTP client for API requests
    client: Client,
    /// Base API endpoint URL
    endpoint: String,
}

impl LyricsDbClient {
    /// Create a new client for the given endpoint (empty string selects
    /// the default public endpoint) with a 30 second request timeout -
    /// used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, 30)
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint.trim_end_matches('/').to_string()
            },
        }
    }

    /// Request a fresh proof-of-work challenge. An empty POST to the
    /// publish endpoint's base path returns `{prefix, target}`.
    pub async fn request_challenge(&self) -> Result<Challenge, ApiError> {
        let url = format!("{}/request-challenge", self.endpoint);
        debug!("Requesting publish challenge from {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_message(response).await;
            error!("Challenge request failed ({}): {}", status, message);
            return Err(ApiError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<Challenge>()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }

    /// Publish a submission with a solved token. A non-success response
    /// surfaces the server's `message` field verbatim.
    pub async fn publish(&self, request: &PublishRequest, token: &str) -> Result<(), ApiError> {
        let url = format!("{}/publish", self.endpoint);
        debug!("Publishing \"{}\" by \"{}\"", request.track_name, request.artist_name);

        let response = self
            .client
            .post(&url)
            .header(PUBLISH_TOKEN_HEADER, token)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_message(response).await;
            error!("Publish failed ({}): {}", status, message);
            return Err(ApiError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Pull the `message` field out of an error response, falling back to
    /// a generic description when the body is not the expected JSON.
    async fn extract_message(response: reqwest::Response) -> String {
        match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "The server rejected the request".to_string(),
        }
    }

    /// Base endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
