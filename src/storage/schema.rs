//! Collection and field names
//!
//! These names are the wire contract with whatever writes the data; they
//! must not change.

/// Flashcard documents
pub const FLASHCARDS: &str = "flashcards";

/// Category documents
pub const CATEGORIES: &str = "categories";

/// Product documents
pub const PRODUCTS: &str = "products";

/// Join rows: (flashcard_id, category_id)
pub const FLASHCARD_CATEGORIES: &str = "flashcard_categories";

/// Join rows: (category_id, product_id)
pub const CATEGORY_PRODUCTS: &str = "category_products";

/// Primary key field of every entity document
pub const ID: &str = "_id";

pub const FLASHCARD_ID: &str = "flashcard_id";
pub const CATEGORY_ID: &str = "category_id";
pub const PRODUCT_ID: &str = "product_id";

/// Get all collection names, entities first
pub fn all_collections() -> &'static [&'static str] {
    &[
        FLASHCARDS,
        CATEGORIES,
        PRODUCTS,
        FLASHCARD_CATEGORIES,
        CATEGORY_PRODUCTS,
    ]
}
