//! Products - sellable bundles of categories

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::id::EntityKey;
use crate::query::QueryBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: EntityKey,
    pub name: String,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub areas: Vec<i32>,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub metadata: ProductMetadata,
    pub enabled: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(rename = "type", default, deserialize_with = "crate::storage::null_as_default")]
    pub product_type: String,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub total_questions: i64,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub total_categories: i64,
    #[serde(default, deserialize_with = "crate::storage::null_as_default")]
    pub languages: Vec<String>,
}

/// Optional constraints for listing products
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub product_type: Option<String>,
    /// Matches products listing this language in `metadata.languages`
    pub language: Option<String>,
    /// Matches products listing this area in `areas`
    pub area_id: Option<i32>,
    pub enabled: Option<bool>,
}

impl ProductFilter {
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .eq("metadata.type", self.product_type.as_deref())
            .eq("metadata.languages", self.language.as_deref())
            .eq("areas", self.area_id)
            .eq("enabled", self.enabled)
    }
}
