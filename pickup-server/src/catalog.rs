//! Product catalog lookup
//!
//! The menu is owned elsewhere (admin CRUD, object store); the order engine
//! only reads it, and only through [`ProductCatalog`]. Submission re-pricing
//! always goes through this seam so a changed product between cart-build and
//! checkout is caught server-side.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::models::Product;

use crate::gateway::GatewayResult;

/// Read access to product data
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: &str) -> GatewayResult<Option<Product>>;

    async fn list_products(&self) -> GatewayResult<Vec<Product>>;
}

/// In-memory product catalog
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: DashMap<String, Product>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.upsert(product);
        }
        catalog
    }

    /// Insert or replace a product
    pub fn upsert(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn remove(&self, id: &str) {
        self.products.remove(id);
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn get_product(&self, id: &str) -> GatewayResult<Option<Product>> {
        Ok(self.products.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        let mut products: Vec<Product> =
            self.products.iter().map(|entry| entry.value().clone()).collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}
