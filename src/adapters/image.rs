use crate::domain::ports::ConfigProvider;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Placeholder shown when a product image cannot be loaded.
pub const DEFAULT_FALLBACK_IMAGE_URL: &str = "https://storage.googleapis.com/workspace-0f70711f-8b4e-4d94-86f1-2a93ccde5887/image/898107aa-dcbc-4d01-a55d-cbab806294c6.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    pub is_fallback: bool,
}

/// Checks that product images are reachable and swaps in the fallback image
/// when they are not. Resolution never fails.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    client: Client,
    fallback_url: String,
}

impl ImageResolver {
    pub fn new(fallback_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client for images: {}", e);
                Client::new()
            });

        Self {
            client,
            fallback_url: fallback_url.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.fallback_image_url(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    pub fn fallback(&self) -> ResolvedImage {
        ResolvedImage {
            url: self.fallback_url.clone(),
            is_fallback: true,
        }
    }

    pub async fn resolve(&self, image_url: &str) -> ResolvedImage {
        if image_url.trim().is_empty() {
            tracing::warn!("🖼️ Product has no image, using fallback");
            return self.fallback();
        }

        if self.is_reachable(image_url).await {
            ResolvedImage {
                url: image_url.to_string(),
                is_fallback: false,
            }
        } else {
            tracing::warn!("🖼️ Image {} failed to load, using fallback", image_url);
            self.fallback()
        }
    }

    /// HEAD first; servers that reject HEAD get a GET.
    async fn is_reachable(&self, image_url: &str) -> bool {
        match self.client.head(image_url).send().await {
            Ok(response) if response.status().is_success() => return true,
            Ok(response) if response.status() != StatusCode::METHOD_NOT_ALLOWED => {
                tracing::debug!("HEAD {} -> {}", image_url, response.status());
                return false;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}", image_url, e);
                return false;
            }
        }

        match self.client.get(image_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("GET {} failed: {}", image_url, e);
                false
            }
        }
    }
}
