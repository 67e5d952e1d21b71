use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::{Envelope, RawReview, Review};

/// Where the API listens in local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4444";

#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with `isSuccess: false`; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected response body (status {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Reads reviews for a business from the REST API.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    client: Client,
    base_url: String,
}

impl ReviewClient {
    /// Creates a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Builds the reviews URL for a business.
    pub fn reviews_url(&self, business_id: &str) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "v1.0.0", "business", business_id, "reviews"]);
        Ok(url)
    }

    /// Fetches the reviews of one business.
    ///
    /// The body is read as an envelope whatever the HTTP status, so a
    /// `{isSuccess: false, message}` error body surfaces its message.
    pub async fn fetch_reviews(&self, business_id: &str) -> Result<Vec<Review>, FetchError> {
        let url = self.reviews_url(business_id)?;
        info!("Fetching reviews for business {business_id}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        let envelope: Envelope<Vec<RawReview>> = serde_json::from_slice(&body)
            .map_err(|source| FetchError::Decode { status, source })?;

        if !envelope.is_success {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Request failed with status {status}"));
            error!("Failed to fetch reviews for business {business_id}: {message}");
            return Err(FetchError::Rejected(message));
        }

        let reviews: Vec<Review> = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Review::from)
            .collect();

        debug!("Received {} reviews for business {business_id}", reviews.len());
        Ok(reviews)
    }
}

impl Default for ReviewClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
