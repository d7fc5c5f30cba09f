//! Flashcards - the unit of study content

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::id::EntityKey;
use crate::query::QueryBuilder;

/// A question/answer card in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(rename = "_id")]
    pub id: EntityKey,
    pub language: String,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub difficulty: String,
    #[serde(default, deserialize_with = "crate::storage::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<FlashcardImage>,
    #[serde(default, deserialize_with = "crate::storage::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub enabled: bool,
    pub verified: bool,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// An image attached to a flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Optional constraints for listing flashcards.
///
/// `category_id` is resolved through the flashcard/category join rows;
/// `tags` matches cards carrying any of the given tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardFilter {
    pub category_id: Option<String>,
    pub difficulty: Option<String>,
    pub language: Option<String>,
    pub verified: Option<bool>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FlashcardFilter {
    /// Query clauses for every field stored on the flashcard itself
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .eq("difficulty", self.difficulty.as_deref())
            .eq("language", self.language.as_deref())
            .eq("verified", self.verified)
            .eq("enabled", self.enabled)
            .any_of("tags", self.tags.iter().map(String::as_str))
    }

    /// Same filter, restricted to one category
    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Same filter, additionally matching `tag`
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
