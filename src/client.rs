use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{error, instrument};
use url::Url;

use crate::errors::ApiError;
use crate::models::{Product, ProductDraft, ProductId};

/// HTTP client for the remote product service.
///
/// The collection lives at the configured base URL; individual products
/// are addressed as `{base}/{id}`. One method per REST operation, each
/// mapping the response onto [`ApiError`] for the view-models.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
}

/// Error payload the backend attaches to rejected requests. Both field
/// names are seen in the wild, so either satisfies the contract.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ProductClient {
    /// Builds a client for the collection rooted at `base_url`, e.g.
    /// `http://localhost:8080/api/produtos`.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Same as [`ProductClient::new`] with a caller-supplied client,
    /// used by tests to point at a mock server.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    fn item_url(&self, id: ProductId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Fetches every product in the catalog.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }
        Self::decode(response).await
    }

    /// Fetches a single product by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        let response = self
            .http
            .get(self.item_url(id))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(id)).await);
        }
        Self::decode(response).await
    }

    /// Creates a product and returns it with the server-assigned id.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }
        Self::decode(response).await
    }

    /// Replaces the product at `id` and returns the stored version.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(draft)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(id)).await);
        }
        Self::decode(response).await
    }

    /// Deletes a product. Success responses may be empty, so any body is
    /// discarded.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(id)).await);
        }
        Ok(())
    }

    fn transport_error(source: reqwest::Error) -> ApiError {
        error!("Request to product service failed: {}", source);
        ApiError::Network {
            reason: source.to_string(),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            error!("Failed to decode product service response: {}", e);
            ApiError::Network {
                reason: format!("undecodable response body: {}", e),
            }
        })
    }

    /// Maps a non-success response onto the error taxonomy: 404 on an
    /// id-addressed route is [`ApiError::NotFound`], any other 4xx with a
    /// structured body is [`ApiError::Validation`], everything else is
    /// [`ApiError::Network`]. Every branch logs the failure before
    /// returning it.
    async fn error_for(response: reqwest::Response, id: Option<ProductId>) -> ApiError {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                error!("Product service returned status {} for product {}", status, id);
                return ApiError::NotFound { id };
            }
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() && status != StatusCode::NOT_FOUND {
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                if let Some(message) = parsed.message.or(parsed.error) {
                    error!(
                        "Product service rejected the request with status {}: {}",
                        status, message
                    );
                    return ApiError::Validation { message };
                }
            }
        }

        error!("Product service returned status {}", status);
        ApiError::Network {
            reason: format!("unexpected status {}", status),
        }
    }
}
