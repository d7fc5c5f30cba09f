use std::sync::Arc;

use crate::Result;
use crate::product::{Product, ProductFilter};
use crate::query::RelationResolver;
use crate::relation::CategoryProduct;
use crate::storage::DocumentStore;

use super::Repository;

/// Product lookups, including lookups by category
#[derive(Clone)]
pub struct ProductRepository {
    products: Repository<Product>,
    resolver: RelationResolver,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            products: Repository::new(Arc::clone(&store)),
            resolver: RelationResolver::new(store),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Product> {
        self.products.find_by_id(id).await
    }

    pub async fn find_by_ids<S: AsRef<str> + Sync>(&self, ids: &[S]) -> Result<Vec<Product>> {
        self.products.find_by_ids(ids).await
    }

    /// Products that include `category_id`
    pub async fn find_by_category(&self, category_id: &str) -> Result<Vec<Product>> {
        self.find_by_categories(&[category_id]).await
    }

    pub async fn find_by_categories<S: AsRef<str> + Sync>(&self, category_ids: &[S]) -> Result<Vec<Product>> {
        let resolution = self.resolver.right_of::<CategoryProduct, S>(category_ids).await?;
        self.products.find_by_keys(&resolution.keys).await
    }

    pub async fn find_with_filters(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        self.products.find_matching(filter.to_query().build()).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.products.count().await
    }
}
