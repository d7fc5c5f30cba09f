//! Storage Layer - document collections behind one async seam
//!
//! Five collections, treated as opaque keyed stores:
//! - flashcards, categories, products (entities keyed by `_id`)
//! - flashcard_categories(flashcard_id, category_id)
//! - category_products(category_id, product_id)
//!
//! `MongoStore` talks to a live MongoDB deployment; `MemoryStore` evaluates
//! the same query subset in-process.

pub mod schema;
pub mod mongo;
pub mod memory;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::Result;
use async_trait::async_trait;
use bson::Document;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Filter-based read access to named document collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>>;

    /// First document in `collection` matching `filter`
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>>;

    /// Number of documents in `collection` matching `filter`
    async fn count(&self, collection: &str, filter: Document) -> Result<u64>;

    /// Release the underlying connection, if any
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Field decoder treating an explicit BSON `null` like a missing field.
///
/// Pair with `#[serde(default)]` so absent fields decode too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Run `filter` against `collection` and decode every match into `T`.
pub async fn fetch_all<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    filter: Document,
) -> Result<Vec<T>> {
    tracing::debug!("find {} {}", collection, filter);
    let documents = store.find(collection, filter).await?;

    let mut records = Vec::with_capacity(documents.len());
    for document in documents {
        records.push(bson::from_document(document)?);
    }
    Ok(records)
}

/// Run `filter` against `collection` and decode the first match into `T`.
pub async fn fetch_one<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    filter: Document,
) -> Result<Option<T>> {
    tracing::debug!("find_one {} {}", collection, filter);
    match store.find_one(collection, filter).await? {
        Some(document) => Ok(Some(bson::from_document(document)?)),
        None => Ok(None),
    }
}
