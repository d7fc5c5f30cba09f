//! Categories - groupings of flashcards, optionally nested

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::id::EntityKey;
use crate::query::QueryBuilder;

/// A named group of flashcards.
///
/// `parent_id` points at another category but is not enforced by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: EntityKey,
    pub name: String,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub description: String,
    #[serde(rename = "type")]
    pub category_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub total_questions: i64,
    pub enabled: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Category {
    /// Check whether this is a top-level category
    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref().is_none_or(str::is_empty)
    }
}

/// Optional constraints for listing categories.
///
/// `product_id` is resolved through the category/product join rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub product_id: Option<String>,
    pub category_type: Option<String>,
    pub parent_id: Option<String>,
    pub enabled: Option<bool>,
    pub name: Option<String>,
}

impl CategoryFilter {
    /// Query clauses for every field stored on the category itself
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .eq("type", self.category_type.as_deref())
            .eq("parent_id", self.parent_id.as_deref())
            .eq("enabled", self.enabled)
            .eq("name", self.name.as_deref())
    }

    /// Same filter, restricted to one product
    pub fn in_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }
}
