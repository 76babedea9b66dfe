use crate::domain::model::Product;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to the remote product catalogue.
///
/// `get_product` must return `StoreError::NotFound` for unknown ids so callers
/// can tell a missing product apart from a failed request.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn get_product(&self, id: u64) -> Result<Product>;
    async fn list_categories(&self) -> Result<Vec<String>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn fallback_image_url(&self) -> &str;
}
