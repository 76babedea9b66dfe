use crate::domain::model::Product;
use crate::domain::ports::{ConfigProvider, ProductSource};
use crate::utils::error::{Result, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// `ProductSource` backed by a fakestoreapi-compatible REST API.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    base_url: Url,
    client: Client,
}

impl HttpProductSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| StoreError::InvalidConfigValueError {
                field: "api_base_url".to_string(),
                value: base_url.to_string(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        // Url::join drops the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(
            config.api_base_url(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::transport(format!("cannot build URL for {}: {}", path, e)))
    }

    /// GETs `url` and decodes the JSON body.
    ///
    /// Returns `Ok(None)` for a 404 or for a successful response with an empty
    /// or `null` body, which is how the upstream API answers unknown ids.
    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        tracing::debug!("📡 GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| StoreError::transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        tracing::debug!("📡 {} -> {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::transport(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::transport(format!("reading body from {} failed: {}", url, e)))?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| StoreError::transport(format!("invalid JSON from {}: {}", url, e)))
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.endpoint("products")?;
        let products: Vec<Product> = self
            .fetch_json(url.clone())
            .await?
            .ok_or_else(|| StoreError::transport(format!("{} returned no catalogue", url)))?;

        tracing::info!("📦 Loaded {} products", products.len());
        Ok(products)
    }

    async fn get_product(&self, id: u64) -> Result<Product> {
        let url = self.endpoint(&format!("products/{}", id))?;
        match self.fetch_json::<Product>(url).await? {
            Some(product) => Ok(product),
            None => {
                tracing::info!("🔍 Product {} not found", id);
                Err(StoreError::NotFound { id })
            }
        }
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        let url = self.endpoint("products/categories")?;
        self.fetch_json(url.clone())
            .await?
            .ok_or_else(|| StoreError::transport(format!("{} returned no categories", url)))
    }
}
