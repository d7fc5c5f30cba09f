//! Entity repositories
//!
//! `Repository<T>` covers the lookups every entity shares (by id, by id set,
//! by filter document). The per-entity repositories add the lookups that go
//! through a join collection.

pub mod flashcard;
pub mod category;
pub mod product;

#[cfg(test)]
pub(crate) mod fixtures;

pub use category::CategoryRepository;
pub use flashcard::FlashcardRepository;
pub use product::ProductRepository;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bson::{doc, Document};
use serde::de::DeserializeOwned;

use crate::category::Category;
use crate::flashcard::Flashcard;
use crate::id::{self, EntityKey};
use crate::product::Product;
use crate::query::QueryBuilder;
use crate::storage::{fetch_all, fetch_one, schema, DocumentStore};
use crate::{Error, Result};

/// The three entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Flashcard,
    Category,
    Product,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Flashcard => "flashcard",
            EntityKind::Category => "category",
            EntityKind::Product => "product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A record stored in its own entity collection, keyed by `_id`.
pub trait Entity: DeserializeOwned + Send + 'static {
    const COLLECTION: &'static str;
    const KIND: EntityKind;

    fn key(&self) -> EntityKey;
}

impl Entity for Flashcard {
    const COLLECTION: &'static str = schema::FLASHCARDS;
    const KIND: EntityKind = EntityKind::Flashcard;

    fn key(&self) -> EntityKey {
        self.id
    }
}

impl Entity for Category {
    const COLLECTION: &'static str = schema::CATEGORIES;
    const KIND: EntityKind = EntityKind::Category;

    fn key(&self) -> EntityKey {
        self.id
    }
}

impl Entity for Product {
    const COLLECTION: &'static str = schema::PRODUCTS;
    const KIND: EntityKind = EntityKind::Product;

    fn key(&self) -> EntityKey {
        self.id
    }
}

/// Typed read access to one entity collection
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Get one entity by its hex identifier.
    ///
    /// A malformed identifier fails before the store is queried.
    pub async fn find_by_id(&self, id: &str) -> Result<T> {
        let key = id::parse(id)?;
        fetch_one(self.store.as_ref(), T::COLLECTION, doc! { "_id": key })
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    /// Get every entity whose identifier is in `ids`; unknown ids are skipped
    pub async fn find_by_ids<S: AsRef<str> + Sync>(&self, ids: &[S]) -> Result<Vec<T>> {
        let keys = id::parse_all(ids)?;
        self.find_by_keys(&keys).await
    }

    /// Batch lookup by native keys. No keys, no query.
    pub async fn find_by_keys(&self, keys: &[EntityKey]) -> Result<Vec<T>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.find_matching(QueryBuilder::new().keys_in(keys).build()).await
    }

    /// Every entity matching `filter`
    pub async fn find_matching(&self, filter: Document) -> Result<Vec<T>> {
        fetch_all(self.store.as_ref(), T::COLLECTION, filter).await
    }

    /// Every entity in the collection
    pub async fn find_all(&self) -> Result<Vec<T>> {
        self.find_matching(Document::new()).await
    }

    /// Number of entities in the collection
    pub async fn count(&self) -> Result<u64> {
        self.store.count(T::COLLECTION, Document::new()).await
    }
}
