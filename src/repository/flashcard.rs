use std::sync::Arc;

use crate::Result;
use crate::flashcard::{Flashcard, FlashcardFilter};
use crate::query::RelationResolver;
use crate::relation::FlashcardCategory;
use crate::storage::DocumentStore;

use super::Repository;

/// Flashcard lookups, including lookups by category
#[derive(Clone)]
pub struct FlashcardRepository {
    flashcards: Repository<Flashcard>,
    resolver: RelationResolver,
}

impl FlashcardRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            flashcards: Repository::new(Arc::clone(&store)),
            resolver: RelationResolver::new(store),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Flashcard> {
        self.flashcards.find_by_id(id).await
    }

    pub async fn find_by_ids<S: AsRef<str> + Sync>(&self, ids: &[S]) -> Result<Vec<Flashcard>> {
        self.flashcards.find_by_ids(ids).await
    }

    /// Flashcards linked to `category_id`
    pub async fn find_by_category(&self, category_id: &str) -> Result<Vec<Flashcard>> {
        self.find_by_categories(&[category_id]).await
    }

    /// Flashcards linked to any of `category_ids`, each returned once
    pub async fn find_by_categories<S: AsRef<str> + Sync>(&self, category_ids: &[S]) -> Result<Vec<Flashcard>> {
        let resolution = self.resolver.left_of::<FlashcardCategory, S>(category_ids).await?;
        self.flashcards.find_by_keys(&resolution.keys).await
    }

    /// Flashcards matching every field set in `filter`.
    ///
    /// A category that resolves to no flashcards yields no results rather
    /// than dropping the constraint.
    pub async fn find_with_filters(&self, filter: &FlashcardFilter) -> Result<Vec<Flashcard>> {
        let mut query = filter.to_query();
        if let Some(category_id) = filter.category_id.as_deref() {
            let resolution = self.resolver.left_of::<FlashcardCategory, _>(&[category_id]).await?;
            query = query.keys_in(&resolution.keys);
        }
        self.flashcards.find_matching(query.build()).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.flashcards.count().await
    }
}
