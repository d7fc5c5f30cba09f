//! In-memory storage implementation
//!
//! Evaluates the query subset the repositories emit:
//! - top-level fields combined conjunctively, dotted paths into subdocuments
//! - plain values (equality), `$eq`, `$in`
//! - array fields match when any element matches

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bson::{Bson, Document};
use serde::Serialize;

use super::DocumentStore;
use crate::Result;

/// Document store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw document to `collection`
    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        collections.entry(collection.to_string()).or_default().push(document);
    }

    /// Serialize `record` and append it to `collection`
    pub fn insert_record<T: Serialize>(&self, collection: &str, record: &T) -> Result<()> {
        let document = bson::to_document(record)?;
        self.insert(collection, document);
        Ok(())
    }

    fn matching(&self, collection: &str, filter: &Document) -> Vec<Document> {
        let collections = self.collections.read().unwrap_or_else(|e| e.into_inner());
        collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>> {
        Ok(self.matching(collection, &filter))
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        Ok(self.matching(collection, &filter).into_iter().next())
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64> {
        Ok(self.matching(collection, &filter).len() as u64)
    }
}

/// Check whether `document` satisfies every clause of `filter`
pub fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(path, condition)| {
        let value = lookup(document, path);
        match condition {
            Bson::Document(ops) if is_operator_document(ops) => {
                ops.iter().all(|(op, arg)| apply_operator(op, arg, value))
            }
            expected => matches_value(value, |v| values_equal(v, expected)),
        }
    })
}

fn is_operator_document(document: &Document) -> bool {
    document.keys().next().is_some_and(|key| key.starts_with('$'))
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Bson::Document(inner) => inner.get(part)?,
            _ => return None,
        };
    }
    Some(current)
}

fn apply_operator(op: &str, arg: &Bson, value: Option<&Bson>) -> bool {
    match op {
        "$eq" => matches_value(value, |v| values_equal(v, arg)),
        "$in" => match arg {
            Bson::Array(candidates) => {
                matches_value(value, |v| candidates.iter().any(|c| values_equal(v, c)))
            }
            _ => false,
        },
        other => {
            tracing::warn!("MemoryStore does not support operator {}", other);
            false
        }
    }
}

/// Arrays match when the array itself or any element satisfies `predicate`;
/// a missing field is treated as null.
fn matches_value<F>(value: Option<&Bson>, predicate: F) -> bool
where
    F: Fn(&Bson) -> bool,
{
    match value {
        Some(array @ Bson::Array(items)) => items.iter().any(&predicate) || predicate(array),
        Some(v) => predicate(v),
        None => predicate(&Bson::Null),
    }
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn card() -> Document {
        doc! {
            "language": "en",
            "tags": ["math", "algebra"],
            "verified": true,
            "level": 3_i32,
            "metadata": { "type": "exam", "languages": ["en", "es"] },
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(matches(&card(), &doc! {}));
    }

    #[test]
    fn test_equality_and_conjunction() {
        assert!(matches(&card(), &doc! { "language": "en", "verified": true }));
        assert!(!matches(&card(), &doc! { "language": "en", "verified": false }));
        assert!(!matches(&card(), &doc! { "missing": "x" }));
    }

    #[test]
    fn test_array_field_matches_any_element() {
        assert!(matches(&card(), &doc! { "tags": "math" }));
        assert!(matches(&card(), &doc! { "tags": { "$in": ["physics", "algebra"] } }));
        assert!(!matches(&card(), &doc! { "tags": { "$in": ["physics"] } }));
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        assert!(!matches(&card(), &doc! { "language": { "$in": [] } }));
    }

    #[test]
    fn test_dotted_paths_and_numbers() {
        assert!(matches(&card(), &doc! { "metadata.type": "exam" }));
        assert!(matches(&card(), &doc! { "metadata.languages": "es" }));
        assert!(matches(&card(), &doc! { "level": 3_i64 }));
        assert!(matches(&card(), &doc! { "level": { "$eq": 3.0 } }));
    }

    #[tokio::test]
    async fn test_store_find_and_count() {
        let store = MemoryStore::new();
        store.insert("cards", card());
        store.insert("cards", doc! { "language": "fr" });

        assert_eq!(store.count("cards", doc! {}).await.unwrap(), 2);

        let french = store.find("cards", doc! { "language": "fr" }).await.unwrap();
        assert_eq!(french.len(), 1);

        let none = store.find_one("other", doc! {}).await.unwrap();
        assert!(none.is_none());
    }
}
