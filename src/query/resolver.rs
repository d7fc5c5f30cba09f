//! Relation Resolver
//!
//! Translates identifiers on one side of a many-to-many relation into keys
//! on the other side by scanning the join collection:
//! 1. Match every row whose `from` field is one of the input ids
//! 2. Collect the opposite field of each row, collapsing duplicates
//! 3. Convert to entity keys, dropping identifiers that are not valid keys
//!
//! Only store failures are errors. Undecodable rows and malformed ids are
//! counted in the returned [`Resolution`] and otherwise ignored.

use std::collections::HashSet;
use std::sync::Arc;

use bson::{doc, Document};

use crate::Result;
use crate::id::{self, EntityKey};
use crate::relation::{Relation, Side};
use crate::storage::DocumentStore;

/// Keys reached through a relation, plus bookkeeping about the scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Distinct target keys, in first-seen row order
    pub keys: Vec<EntityKey>,
    /// Join rows matched by the scan
    pub rows: usize,
    /// Rows that could not be decoded plus distinct target ids that are not valid keys
    pub dropped: usize,
}

impl Resolution {
    /// True when no target key was reached
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolves identifiers across join collections
#[derive(Clone)]
pub struct RelationResolver {
    store: Arc<dyn DocumentStore>,
}

impl RelationResolver {
    /// Create a resolver over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Keys on the left side of `R` for the given right-side ids
    pub async fn left_of<R: Relation, S: AsRef<str> + Sync>(&self, right_ids: &[S]) -> Result<Resolution> {
        self.resolve::<R, S>(Side::Right, right_ids).await
    }

    /// Keys on the right side of `R` for the given left-side ids
    pub async fn right_of<R: Relation, S: AsRef<str> + Sync>(&self, left_ids: &[S]) -> Result<Resolution> {
        self.resolve::<R, S>(Side::Left, left_ids).await
    }

    /// Resolve `ids` found on side `from` of `R` into keys on the opposite side.
    ///
    /// An empty input never touches the store.
    pub async fn resolve<R: Relation, S: AsRef<str> + Sync>(&self, from: Side, ids: &[S]) -> Result<Resolution> {
        let ids = id::dedup(ids);
        if ids.is_empty() {
            return Ok(Resolution::default());
        }

        let filter = Self::rows_filter(R::field(from), ids);
        tracing::debug!("scan {} {}", R::COLLECTION, filter);
        let rows = self.store.find(R::COLLECTION, filter).await?;

        let resolution = Self::collect_targets::<R>(rows, from.opposite());
        if resolution.dropped > 0 {
            tracing::warn!(
                "Dropped {} of {} relation rows in {} with unusable identifiers",
                resolution.dropped,
                resolution.rows,
                R::COLLECTION
            );
        }
        tracing::debug!(
            "Resolved {} keys from {} rows in {}",
            resolution.keys.len(),
            resolution.rows,
            R::COLLECTION
        );
        Ok(resolution)
    }

    fn rows_filter(field: &str, mut ids: Vec<String>) -> Document {
        let mut filter = Document::new();
        if ids.len() == 1 {
            filter.insert(field, ids.remove(0));
        } else {
            filter.insert(field, doc! { "$in": ids });
        }
        filter
    }

    fn collect_targets<R: Relation>(rows: Vec<Document>, to: Side) -> Resolution {
        let mut resolution = Resolution {
            rows: rows.len(),
            ..Default::default()
        };
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut seen_keys: HashSet<EntityKey> = HashSet::new();

        for row in rows {
            let Ok(row) = bson::from_document::<R>(row) else {
                resolution.dropped += 1;
                continue;
            };

            let target = row.end(to);
            if !seen_ids.insert(target.to_string()) {
                continue;
            }

            match id::parse_lenient(target) {
                Some(key) => {
                    if seen_keys.insert(key) {
                        resolution.keys.push(key);
                    }
                }
                None => resolution.dropped += 1,
            }
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{CategoryProduct, FlashcardCategory};
    use crate::storage::{schema, MemoryStore};

    const F1: &str = "65a1f0c2e4b0a1b2c3d4e501";
    const F2: &str = "65a1f0c2e4b0a1b2c3d4e502";
    const F3: &str = "65a1f0c2e4b0a1b2c3d4e503";

    fn store_with(rows: &[(&str, &str)]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for (flashcard_id, category_id) in rows {
            store
                .insert_record(schema::FLASHCARD_CATEGORIES, &FlashcardCategory::new(*flashcard_id, *category_id))
                .unwrap();
        }
        store
    }

    fn hex(resolution: &Resolution) -> Vec<String> {
        let mut ids: Vec<String> = resolution.keys.iter().map(|k| k.to_hex()).collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn test_single_and_multiple_sources_dedup() {
        let store = store_with(&[(F1, "c1"), (F2, "c1"), (F1, "c2")]);
        let resolver = RelationResolver::new(store);

        let one = resolver.left_of::<FlashcardCategory, _>(&["c1"]).await.unwrap();
        assert_eq!(hex(&one), vec![F1, F2]);

        let both = resolver.left_of::<FlashcardCategory, _>(&["c1", "c2"]).await.unwrap();
        assert_eq!(hex(&both), vec![F1, F2]);
        assert_eq!(both.rows, 3);
        assert_eq!(both.dropped, 0);
    }

    #[tokio::test]
    async fn test_duplicate_rows_collapse() {
        let store = store_with(&[(F1, "c1"), (F1, "c1"), (F1, "c1")]);
        let resolver = RelationResolver::new(store);

        let resolution = resolver.left_of::<FlashcardCategory, _>(&["c1"]).await.unwrap();
        assert_eq!(resolution.keys.len(), 1);
        assert_eq!(resolution.rows, 3);
    }

    #[tokio::test]
    async fn test_malformed_targets_are_dropped() {
        let store = store_with(&[(F1, "c1"), ("not-hex", "c1"), (F3, "c1")]);
        store.insert(schema::FLASHCARD_CATEGORIES, bson::doc! { "category_id": "c1", "flashcard_id": 42 });
        let resolver = RelationResolver::new(store);

        let resolution = resolver.left_of::<FlashcardCategory, _>(&["c1"]).await.unwrap();
        assert_eq!(hex(&resolution), vec![F1, F3]);
        assert_eq!(resolution.rows, 4);
        assert_eq!(resolution.dropped, 2);
    }

    #[tokio::test]
    async fn test_empty_input_and_no_match() {
        let store = store_with(&[(F1, "c1")]);
        let resolver = RelationResolver::new(store);

        let empty = resolver.left_of::<FlashcardCategory, &str>(&[]).await.unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.rows, 0);

        let none = resolver.left_of::<FlashcardCategory, _>(&["c9"]).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_forward_direction() {
        let store = store_with(&[(F1, "65a1f0c2e4b0a1b2c3d4e5c1"), (F1, "65a1f0c2e4b0a1b2c3d4e5c2")]);
        let resolver = RelationResolver::new(store);

        let categories = resolver.right_of::<FlashcardCategory, _>(&[F1]).await.unwrap();
        assert_eq!(categories.keys.len(), 2);

        let products = resolver.right_of::<CategoryProduct, _>(&["65a1f0c2e4b0a1b2c3d4e5c1"]).await.unwrap();
        assert!(products.is_empty());
    }
}
