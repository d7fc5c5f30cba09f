//! # StudyDeck - read-only data access for study content
//!
//! Typed lookups over three document collections (flashcards, categories,
//! products) connected through two many-to-many join collections.
//!
//! StudyDeck provides:
//! - Entity records with stable wire-format field names
//! - A `DocumentStore` seam with MongoDB and in-memory backends
//! - Relationship resolution through join collections
//! - Per-entity repositories (by id, by related entity, by filter)
//! - A thin client facade with connection setup and optional deadlines

pub mod id;
pub mod flashcard;
pub mod category;
pub mod product;
pub mod relation;
pub mod storage;
pub mod query;
pub mod repository;
pub mod client;
pub mod config;
pub mod output;
pub mod ui;

use std::time::Duration;

// Re-exports for convenient access
pub use id::EntityKey;
pub use flashcard::{Flashcard, FlashcardFilter, FlashcardImage};
pub use category::{Category, CategoryFilter};
pub use product::{Product, ProductFilter, ProductMetadata};
pub use relation::{CategoryProduct, FlashcardCategory, Relation, Side};
pub use storage::{DocumentStore, MemoryStore, MongoStore};
pub use query::{QueryBuilder, RelationResolver, Resolution};
pub use repository::{CategoryRepository, Entity, EntityKind, FlashcardRepository, ProductRepository, Repository};
pub use client::{ClientConfig, StoreStats, StudyClient};

/// Result type alias for StudyDeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for StudyDeck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("Encode error: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl Error {
    /// True for a single-entity lookup that matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
