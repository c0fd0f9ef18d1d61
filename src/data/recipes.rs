//! Recipe feed client
//!
//! Fetches the recipe document from the remote endpoint and decodes it into
//! `Recipe` records. Every call is a single attempt; failures are classified
//! into `FetchError` and handed back to the caller.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};
use thiserror::Error;

use super::{Recipe, RecipeResponse};

/// Endpoint serving the full recipe feed
pub const DEFAULT_ENDPOINT: &str = "https://d3jbb8n5wk0qxi.cloudfront.net/recipes.json";

/// Endpoint serving a deliberately malformed feed
pub const MALFORMED_ENDPOINT: &str =
    "https://d3jbb8n5wk0qxi.cloudfront.net/recipes-malformed.json";

/// Endpoint serving a feed with no recipes
pub const EMPTY_ENDPOINT: &str = "https://d3jbb8n5wk0qxi.cloudfront.net/recipes-empty.json";

/// Errors that can occur when fetching recipes or recipe photos
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL could not be parsed
    #[error("Invalid URL")]
    InvalidUrl,

    /// The response could not be read, or a photo request was rejected
    #[error("Invalid response from server")]
    InvalidResponse,

    /// The payload is not usable (e.g. photo bytes that are not an image)
    #[error("Invalid data received")]
    InvalidData,

    /// The body is not a valid recipe document
    #[error("Could not decode the data. The data might be malformed.")]
    Decoding(#[source] serde_json::Error),

    /// The server answered with a non-2xx status
    #[error("Server error: {status_code}")]
    Server { status_code: u16 },

    /// The request never produced a response
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can produce the recipe list
///
/// `RecipeClient` is the production implementation; the list model only
/// depends on this trait so it can be driven without a network.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch the full, ordered recipe list
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, FetchError>;
}

/// Client for fetching the recipe feed over HTTP
#[derive(Debug, Clone)]
pub struct RecipeClient {
    client: Client,
    endpoint: String,
}

impl Default for RecipeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeClient {
    /// Create a new RecipeClient pointed at the default feed
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Create a new RecipeClient pointed at a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Replace the underlying HTTP client
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// The endpoint this client reads from
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and decode the recipe list
    ///
    /// # Returns
    /// * `Ok(Vec<Recipe>)` - Recipes in the order the feed lists them
    /// * `Err(FetchError::InvalidUrl)` - The endpoint is not an absolute URL
    /// * `Err(FetchError::Server)` - The server answered with a non-2xx status
    /// * `Err(FetchError::Decoding)` - The body is not a recipe document
    pub async fn fetch_recipes(&self) -> Result<Vec<Recipe>, FetchError> {
        let url = Url::parse(&self.endpoint).map_err(|_| FetchError::InvalidUrl)?;
        debug!("Fetching recipes from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Server {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|_| FetchError::InvalidResponse)?;

        let recipes = decode_recipes(&body)?;
        info!("Fetched {} recipes from {}", recipes.len(), self.endpoint);
        Ok(recipes)
    }
}

#[async_trait]
impl RecipeSource for RecipeClient {
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, FetchError> {
        RecipeClient::fetch_recipes(self).await
    }
}

/// Decode a `{"recipes": [...]}` document
pub fn decode_recipes(body: &[u8]) -> Result<Vec<Recipe>, FetchError> {
    serde_json::from_slice::<RecipeResponse>(body)
        .map(|response| response.recipes)
        .map_err(FetchError::Decoding)
}
