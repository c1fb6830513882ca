//! Listing-copy generation client.
//!
//! Thin client for the external AI service that turns a product image
//! and a short text prompt into marketing copy for a listing. The
//! service is slow (it runs a model per request), so callers should
//! treat a call as a long-running operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the listing-copy service.
#[derive(Debug, Error)]
pub enum ListingError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error response.
    #[error("listing service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Generated marketing copy for a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCopy {
    /// Service-side trace id, passed through for support requests.
    pub trace_id: String,
    pub title: String,
    pub description: String,
    pub slogan: String,
    pub hashtags: Vec<String>,
    pub image_description: String,
    pub video_description: String,
}

/// Request body for the generation endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    image_url: &'a str,
    text: &'a str,
}

/// Client for the listing-copy generation service.
#[derive(Clone)]
pub struct ListingClient {
    client: reqwest::Client,
    base_url: String,
}

impl ListingClient {
    /// Create a new listing-copy client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ListingError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Generate listing copy from an image URL and a text prompt.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::Api` on a non-success status and
    /// `ListingError::Parse` if the response body doesn't match the
    /// expected shape.
    pub async fn generate(&self, image_url: &str, text: &str) -> Result<ListingCopy, ListingError> {
        let url = format!("{}/processing-input", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { image_url, text })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ListingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ListingError::Parse(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape_deserializes() {
        let json = serde_json::json!({
            "trace_id": "tr-123",
            "title": "Clear Acrylic Keychain Set",
            "description": "A set of 200 keychain blanks.",
            "slogan": "Make it yours",
            "hashtags": ["#crafts", "#keychain"],
            "image_description": "Transparent pendants on a table",
            "video_description": "A hand assembling a keychain"
        });

        let copy: ListingCopy = serde_json::from_value(json).unwrap();
        assert_eq!(copy.trace_id, "tr-123");
        assert_eq!(copy.hashtags.len(), 2);
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ListingClient::new("https://example.com/").unwrap();
        assert_eq!(client.base_url, "https://example.com");
    }
}
