//! Relation rows - many-to-many association edges
//!
//! Each join collection holds rows of two string identifiers:
//! - `flashcard_categories`: flashcard ↔ category
//! - `category_products`: category ↔ product
//!
//! Rows have no lifecycle of their own, may be duplicated and may point
//! at entities that no longer exist.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::storage::schema;

/// One end of a relation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Get the string representation of the side
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// The other end of the row
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A join-row shape stored in its own collection.
pub trait Relation: DeserializeOwned + Send {
    /// Join collection holding the rows
    const COLLECTION: &'static str;
    /// Field naming the left-hand entity
    const LEFT_FIELD: &'static str;
    /// Field naming the right-hand entity
    const RIGHT_FIELD: &'static str;

    fn left(&self) -> &str;
    fn right(&self) -> &str;

    /// Field holding the identifier on `side`
    fn field(side: Side) -> &'static str {
        match side {
            Side::Left => Self::LEFT_FIELD,
            Side::Right => Self::RIGHT_FIELD,
        }
    }

    /// Identifier on `side` of this row
    fn end(&self, side: Side) -> &str {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }
}

/// Flashcard (left) belongs to category (right)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashcardCategory {
    pub flashcard_id: String,
    pub category_id: String,
}

impl FlashcardCategory {
    pub fn new(flashcard_id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            flashcard_id: flashcard_id.into(),
            category_id: category_id.into(),
        }
    }
}

impl Relation for FlashcardCategory {
    const COLLECTION: &'static str = schema::FLASHCARD_CATEGORIES;
    const LEFT_FIELD: &'static str = schema::FLASHCARD_ID;
    const RIGHT_FIELD: &'static str = schema::CATEGORY_ID;

    fn left(&self) -> &str {
        &self.flashcard_id
    }

    fn right(&self) -> &str {
        &self.category_id
    }
}

/// Category (left) is part of product (right)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryProduct {
    pub category_id: String,
    pub product_id: String,
}

impl CategoryProduct {
    pub fn new(category_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            product_id: product_id.into(),
        }
    }
}

impl Relation for CategoryProduct {
    const COLLECTION: &'static str = schema::CATEGORY_PRODUCTS;
    const LEFT_FIELD: &'static str = schema::CATEGORY_ID;
    const RIGHT_FIELD: &'static str = schema::PRODUCT_ID;

    fn left(&self) -> &str {
        &self.category_id
    }

    fn right(&self) -> &str {
        &self.product_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        for side in [Side::Left, Side::Right] {
            assert_eq!(side.opposite().opposite(), side);
        }
        assert_eq!(Side::Right.to_string(), "right");
    }

    #[test]
    fn test_fields_by_side() {
        assert_eq!(FlashcardCategory::field(Side::Left), "flashcard_id");
        assert_eq!(FlashcardCategory::field(Side::Right), "category_id");
        assert_eq!(CategoryProduct::field(Side::Left), "category_id");
        assert_eq!(CategoryProduct::field(Side::Right), "product_id");
    }

    #[test]
    fn test_row_ends() {
        let row = CategoryProduct::new("c1", "p1");
        assert_eq!(row.end(Side::Left), "c1");
        assert_eq!(row.end(Side::Right), "p1");
    }

    #[test]
    fn test_row_wire_format() {
        let row = FlashcardCategory::new("f1", "c1");
        let document = bson::to_document(&row).unwrap();
        assert_eq!(document, bson::doc! { "flashcard_id": "f1", "category_id": "c1" });
    }
}
