use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::Product;
use tracing::info;

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod flows;
pub mod views;

pub use api::{HttpProductApi, ProductApi};
pub use cache::TagCache;
pub use config::Settings;
pub use error::{ApiError, DeleteRejected, FieldErrors, SubmitRejected, ValidationError};

/// Cache tag covering the product listing.
pub const PRODUCTS_TAG: &str = "products";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    List,
    AddProduct,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::List => "/",
            Self::AddProduct => "/addproduct",
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Invalidates cached collections so the next read goes to the server.
///
/// Fire-and-forget: callers never observe a failure.
#[async_trait]
pub trait Revalidate: Send + Sync {
    async fn revalidate(&self, tag: &str);
}

/// Product API access with a read-through listing cache under [`PRODUCTS_TAG`].
pub struct CatalogClient {
    api: Arc<dyn ProductApi>,
    cache: TagCache<Vec<Product>>,
}

impl CatalogClient {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            api,
            cache: TagCache::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let api = HttpProductApi::with_timeout(&settings.api_base, settings.request_timeout())?;
        Ok(Self::new(Arc::new(api)))
    }

    pub fn api(&self) -> &dyn ProductApi {
        self.api.as_ref()
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.cache
            .get_or_fetch(PRODUCTS_TAG, || self.api.list_products())
            .await
    }

    pub async fn is_fresh(&self) -> bool {
        self.cache.is_fresh(PRODUCTS_TAG).await
    }
}

#[async_trait]
impl Revalidate for CatalogClient {
    async fn revalidate(&self, tag: &str) {
        info!(tag, "revalidating cached collection");
        self.cache.invalidate(tag).await;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
