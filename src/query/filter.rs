//! Conjunctive query construction from optional constraints
//!
//! Every clause is independent: an absent value adds nothing, a present
//! value adds exactly one clause.

use bson::{doc, Bson, Document};

use crate::id::EntityKey;
use crate::storage::schema;

/// Builds a filter document one optional clause at a time.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Document,
}

impl QueryBuilder {
    /// Start from an unconstrained query (matches every document)
    pub fn new() -> Self {
        Self::default()
    }

    /// `field == value` when `value` is present
    pub fn eq<V: Into<Bson>>(mut self, field: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.insert(field, value.into());
        }
        self
    }

    /// `field` matches any of `values` when at least one value is given.
    ///
    /// Against a multi-valued field this is "contains any of".
    pub fn any_of<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Bson>,
    {
        let values: Vec<Bson> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.query.insert(field, doc! { "$in": values });
        }
        self
    }

    /// Restrict `_id` to `keys`. Always applied, so an empty set matches nothing.
    pub fn keys_in(mut self, keys: &[EntityKey]) -> Self {
        let keys: Vec<Bson> = keys.iter().copied().map(Bson::ObjectId).collect();
        self.query.insert(schema::ID, doc! { "$in": keys });
        self
    }

    /// Finish and return the filter document
    pub fn build(self) -> Document {
        self.query
    }
}
