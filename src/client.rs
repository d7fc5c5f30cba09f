//! Client facade
//!
//! Owns the store connection and hands every call through to the matching
//! repository. Each call is one independent request; when a query timeout
//! is configured the call is abandoned (its store future dropped) once the
//! deadline passes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bson::Document;
use serde::Serialize;

use crate::category::{Category, CategoryFilter};
use crate::flashcard::{Flashcard, FlashcardFilter};
use crate::product::{Product, ProductFilter};
use crate::repository::{CategoryRepository, FlashcardRepository, ProductRepository};
use crate::storage::{schema, DocumentStore, MongoStore};
use crate::{Error, Result};

/// Applied when no connect timeout (or a zero one) is configured
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Logical database holding the five collections
    pub database: String,
    pub connect_timeout: Option<Duration>,
    /// Upper bound for each individual operation
    pub query_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            connect_timeout: None,
            query_timeout: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Connect timeout with the default filled in
    pub fn effective_connect_timeout(&self) -> Duration {
        match self.connect_timeout {
            Some(timeout) if !timeout.is_zero() => timeout,
            _ => DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Document counts per collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub flashcards: u64,
    pub categories: u64,
    pub products: u64,
    pub flashcard_categories: u64,
    pub category_products: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Flashcards: {}", self.flashcards)?;
        writeln!(f, "  Categories: {}", self.categories)?;
        writeln!(f, "  Products: {}", self.products)?;
        writeln!(f, "  Flashcard/category links: {}", self.flashcard_categories)?;
        write!(f, "  Category/product links: {}", self.category_products)
    }
}

/// Read-only entry point for callers
pub struct StudyClient {
    store: Arc<dyn DocumentStore>,
    flashcards: FlashcardRepository,
    categories: CategoryRepository,
    products: ProductRepository,
    query_timeout: Option<Duration>,
}

impl StudyClient {
    /// Connect to MongoDB and verify the deployment is reachable
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let timeout = config.effective_connect_timeout();
        let store = MongoStore::connect(&config.uri, &config.database, timeout).await?;
        Ok(Self::with_store(Arc::new(store)).with_query_timeout(config.query_timeout))
    }

    /// Build a client over any store implementation
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            flashcards: FlashcardRepository::new(Arc::clone(&store)),
            categories: CategoryRepository::new(Arc::clone(&store)),
            products: ProductRepository::new(Arc::clone(&store)),
            store,
            query_timeout: None,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Release the store connection
    pub async fn close(self) -> Result<()> {
        self.store.close().await
    }

    pub fn flashcards(&self) -> &FlashcardRepository {
        &self.flashcards
    }

    pub fn categories(&self) -> &CategoryRepository {
        &self.categories
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.query_timeout {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .map_err(|_| Error::DeadlineExceeded(limit))?,
            None => operation.await,
        }
    }

    // ========== Flashcards ==========

    pub async fn get_flashcard(&self, id: &str) -> Result<Flashcard> {
        self.bounded(self.flashcards.find_by_id(id)).await
    }

    pub async fn get_flashcards(&self, ids: &[&str]) -> Result<Vec<Flashcard>> {
        self.bounded(self.flashcards.find_by_ids(ids)).await
    }

    pub async fn get_flashcards_by_category(&self, category_id: &str) -> Result<Vec<Flashcard>> {
        self.bounded(self.flashcards.find_by_category(category_id)).await
    }

    pub async fn get_flashcards_by_categories(&self, category_ids: &[&str]) -> Result<Vec<Flashcard>> {
        self.bounded(self.flashcards.find_by_categories(category_ids)).await
    }

    pub async fn list_flashcards(&self, filter: &FlashcardFilter) -> Result<Vec<Flashcard>> {
        self.bounded(self.flashcards.find_with_filters(filter)).await
    }

    // ========== Categories ==========

    pub async fn get_category(&self, id: &str) -> Result<Category> {
        self.bounded(self.categories.find_by_id(id)).await
    }

    pub async fn get_categories(&self, ids: &[&str]) -> Result<Vec<Category>> {
        self.bounded(self.categories.find_by_ids(ids)).await
    }

    pub async fn get_categories_by_flashcard(&self, flashcard_id: &str) -> Result<Vec<Category>> {
        self.bounded(self.categories.find_by_flashcard(flashcard_id)).await
    }

    pub async fn get_categories_by_flashcards(&self, flashcard_ids: &[&str]) -> Result<Vec<Category>> {
        self.bounded(self.categories.find_by_flashcards(flashcard_ids)).await
    }

    pub async fn get_categories_by_product(&self, product_id: &str) -> Result<Vec<Category>> {
        self.bounded(self.categories.find_by_product(product_id)).await
    }

    pub async fn get_categories_by_products(&self, product_ids: &[&str]) -> Result<Vec<Category>> {
        self.bounded(self.categories.find_by_products(product_ids)).await
    }

    pub async fn list_categories(&self, filter: &CategoryFilter) -> Result<Vec<Category>> {
        self.bounded(self.categories.find_with_filters(filter)).await
    }

    // ========== Products ==========

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.bounded(self.products.find_by_id(id)).await
    }

    pub async fn get_products(&self, ids: &[&str]) -> Result<Vec<Product>> {
        self.bounded(self.products.find_by_ids(ids)).await
    }

    pub async fn get_products_by_category(&self, category_id: &str) -> Result<Vec<Product>> {
        self.bounded(self.products.find_by_category(category_id)).await
    }

    pub async fn get_products_by_categories(&self, category_ids: &[&str]) -> Result<Vec<Product>> {
        self.bounded(self.products.find_by_categories(category_ids)).await
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        self.bounded(self.products.find_with_filters(filter)).await
    }

    // ========== Statistics ==========

    /// Count the documents in all five collections
    pub async fn stats(&self) -> Result<StoreStats> {
        self.bounded(async {
            let mut counts = Vec::with_capacity(schema::all_collections().len());
            for collection in schema::all_collections() {
                counts.push(self.store.count(collection, Document::new()).await?);
            }
            Ok(StoreStats {
                flashcards: counts[0],
                categories: counts[1],
                products: counts[2],
                flashcard_categories: counts[3],
                category_products: counts[4],
            })
        })
        .await
    }
}
