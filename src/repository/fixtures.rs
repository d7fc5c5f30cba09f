//! Shared test data: a small catalog with duplicate, dangling and
//! malformed join rows.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::{DateTime, Document};

use crate::category::Category;
use crate::flashcard::Flashcard;
use crate::id;
use crate::product::{Product, ProductMetadata};
use crate::relation::{CategoryProduct, FlashcardCategory};
use crate::storage::{schema, DocumentStore, MemoryStore};
use crate::Result;

pub const F1: &str = "65a1f0c2e4b0a1b2c3d4e501";
pub const F2: &str = "65a1f0c2e4b0a1b2c3d4e502";
pub const F3: &str = "65a1f0c2e4b0a1b2c3d4e503";
pub const F4: &str = "65a1f0c2e4b0a1b2c3d4e504";

pub const C1: &str = "65a1f0c2e4b0a1b2c3d4e5c1";
pub const C2: &str = "65a1f0c2e4b0a1b2c3d4e5c2";
pub const C3: &str = "65a1f0c2e4b0a1b2c3d4e5c3";
/// A category with no join rows at all
pub const C_EMPTY: &str = "65a1f0c2e4b0a1b2c3d4e5c9";

pub const P1: &str = "65a1f0c2e4b0a1b2c3d4e5a1";
pub const P2: &str = "65a1f0c2e4b0a1b2c3d4e5a2";

/// Well-formed, but no document has this key
pub const MISSING: &str = "65a1f0c2e4b0a1b2c3d4e5ff";

pub fn flashcard(id: &str, language: &str, difficulty: &str, tags: &[&str], verified: bool, enabled: bool) -> Flashcard {
    Flashcard {
        id: id::parse(id).unwrap(),
        language: language.to_string(),
        front: format!("front of {}", id),
        back: format!("back of {}", id),
        hint: None,
        difficulty: difficulty.to_string(),
        images: Vec::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        enabled,
        verified,
        created_by: "author".to_string(),
        verified_by: verified.then(|| "reviewer".to_string()),
        created_at: DateTime::from_millis(1_700_000_000_000),
        updated_at: DateTime::from_millis(1_700_000_000_000),
    }
}

pub fn category(id: &str, name: &str, category_type: &str, parent_id: Option<&str>, enabled: bool) -> Category {
    Category {
        id: id::parse(id).unwrap(),
        name: name.to_string(),
        description: String::new(),
        category_type: category_type.to_string(),
        icon: None,
        color: None,
        parent_id: parent_id.map(str::to_string),
        total_questions: 0,
        enabled,
        created_at: DateTime::from_millis(1_700_000_000_000),
        updated_at: DateTime::from_millis(1_700_000_000_000),
    }
}

pub fn product(id: &str, name: &str, product_type: &str, languages: &[&str], areas: &[i32], enabled: bool) -> Product {
    Product {
        id: id::parse(id).unwrap(),
        name: name.to_string(),
        description: String::new(),
        areas: areas.to_vec(),
        metadata: ProductMetadata {
            product_type: product_type.to_string(),
            total_questions: 0,
            total_categories: 0,
            languages: languages.iter().map(|l| l.to_string()).collect(),
        },
        enabled,
        created_at: DateTime::from_millis(1_700_000_000_000),
        updated_at: DateTime::from_millis(1_700_000_000_000),
    }
}

/// Flashcards F1..F4, categories C1..C3, products P1..P2.
///
/// Join rows:
/// - F1, F2 in C1 (F2 twice); F1 and a missing card in C2; a malformed id in C2; F3 in C3
/// - C1, C2 in P1; C3 in P2; C2 also in a missing product
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();

    for card in [
        flashcard(F1, "en", "easy", &["x"], true, true),
        flashcard(F2, "en", "hard", &["y", "z"], false, true),
        flashcard(F3, "es", "easy", &["z"], true, false),
        flashcard(F4, "en", "easy", &[], true, true),
    ] {
        store.insert_record(schema::FLASHCARDS, &card).unwrap();
    }

    for cat in [
        category(C1, "Algebra", "topic", None, true),
        category(C2, "Linear equations", "topic", Some(C1), true),
        category(C3, "Mock exam", "exam", None, false),
    ] {
        store.insert_record(schema::CATEGORIES, &cat).unwrap();
    }

    for prod in [
        product(P1, "Math pack", "exam", &["en", "es"], &[1, 2], true),
        product(P2, "Exam drills", "course", &["en"], &[3], false),
    ] {
        store.insert_record(schema::PRODUCTS, &prod).unwrap();
    }

    for (flashcard_id, category_id) in [
        (F1, C1),
        (F2, C1),
        (F2, C1),
        (F1, C2),
        (MISSING, C2),
        ("broken", C2),
        (F3, C3),
    ] {
        store
            .insert_record(schema::FLASHCARD_CATEGORIES, &FlashcardCategory::new(flashcard_id, category_id))
            .unwrap();
    }

    for (category_id, product_id) in [(C1, P1), (C2, P1), (C3, P2), (C2, MISSING)] {
        store
            .insert_record(schema::CATEGORY_PRODUCTS, &CategoryProduct::new(category_id, product_id))
            .unwrap();
    }

    Arc::new(store)
}

/// Records which collections were queried before delegating.
pub struct CountingStore {
    inner: Arc<dyn DocumentStore>,
    queried: Mutex<Vec<String>>,
}

impl Default for CountingStore {
    fn default() -> Self {
        Self::wrapping(Arc::new(MemoryStore::new()))
    }
}

impl CountingStore {
    pub fn wrapping(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            queried: Mutex::new(Vec::new()),
        }
    }

    /// Total store calls so far
    pub fn calls(&self) -> usize {
        self.queried.lock().unwrap().len()
    }

    /// Whether `collection` has been queried
    pub fn queried(&self, collection: &str) -> bool {
        self.queried.lock().unwrap().iter().any(|c| c == collection)
    }

    fn record(&self, collection: &str) {
        self.queried.lock().unwrap().push(collection.to_string());
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>> {
        self.record(collection);
        self.inner.find(collection, filter).await
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        self.record(collection);
        self.inner.find_one(collection, filter).await
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64> {
        self.record(collection);
        self.inner.count(collection, filter).await
    }
}

/// Sort entity keys as hex strings for order-independent comparisons
pub fn sorted_hex<I: IntoIterator<Item = id::EntityKey>>(keys: I) -> Vec<String> {
    let mut ids: Vec<String> = keys.into_iter().map(|k| k.to_hex()).collect();
    ids.sort();
    ids
}
