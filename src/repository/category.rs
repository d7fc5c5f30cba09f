use std::sync::Arc;

use crate::Result;
use crate::category::{Category, CategoryFilter};
use crate::query::RelationResolver;
use crate::relation::{CategoryProduct, FlashcardCategory};
use crate::storage::DocumentStore;

use super::Repository;

/// Category lookups, from either side: flashcards below, products above
#[derive(Clone)]
pub struct CategoryRepository {
    categories: Repository<Category>,
    resolver: RelationResolver,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            categories: Repository::new(Arc::clone(&store)),
            resolver: RelationResolver::new(store),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Category> {
        self.categories.find_by_id(id).await
    }

    pub async fn find_by_ids<S: AsRef<str> + Sync>(&self, ids: &[S]) -> Result<Vec<Category>> {
        self.categories.find_by_ids(ids).await
    }

    /// Categories `flashcard_id` belongs to
    pub async fn find_by_flashcard(&self, flashcard_id: &str) -> Result<Vec<Category>> {
        self.find_by_flashcards(&[flashcard_id]).await
    }

    pub async fn find_by_flashcards<S: AsRef<str> + Sync>(&self, flashcard_ids: &[S]) -> Result<Vec<Category>> {
        let resolution = self.resolver.right_of::<FlashcardCategory, S>(flashcard_ids).await?;
        self.categories.find_by_keys(&resolution.keys).await
    }

    /// Categories included in `product_id`
    pub async fn find_by_product(&self, product_id: &str) -> Result<Vec<Category>> {
        self.find_by_products(&[product_id]).await
    }

    pub async fn find_by_products<S: AsRef<str> + Sync>(&self, product_ids: &[S]) -> Result<Vec<Category>> {
        let resolution = self.resolver.left_of::<CategoryProduct, S>(product_ids).await?;
        self.categories.find_by_keys(&resolution.keys).await
    }

    /// Categories matching every field set in `filter`; `product_id` goes
    /// through the product join rows and always constrains the result.
    pub async fn find_with_filters(&self, filter: &CategoryFilter) -> Result<Vec<Category>> {
        let mut query = filter.to_query();
        if let Some(product_id) = filter.product_id.as_deref() {
            let resolution = self.resolver.left_of::<CategoryProduct, _>(&[product_id]).await?;
            query = query.keys_in(&resolution.keys);
        }
        self.categories.find_matching(query.build()).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.categories.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Entity;
    use crate::repository::fixtures::*;
    use crate::id;
    use crate::storage::schema;
    use bson::doc;

    fn repo() -> CategoryRepository {
        CategoryRepository::new(seeded_store())
    }

    fn keys(categories: &[Category]) -> Vec<String> {
        sorted_hex(categories.iter().map(Entity::key))
    }

    #[tokio::test]
    async fn test_find_by_flashcard() {
        let categories = repo().find_by_flashcard(F1).await.unwrap();
        assert_eq!(keys(&categories), vec![C1, C2]);

        let categories = repo().find_by_flashcards(&[F2, F3]).await.unwrap();
        assert_eq!(keys(&categories), vec![C1, C3]);

        assert!(repo().find_by_flashcard(F4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_product() {
        let categories = repo().find_by_product(P1).await.unwrap();
        assert_eq!(keys(&categories), vec![C1, C2]);

        let categories = repo().find_by_products(&[P1, P2, P1]).await.unwrap();
        assert_eq!(keys(&categories), vec![C1, C2, C3]);
    }

    #[tokio::test]
    async fn test_filters() {
        let all = repo().find_with_filters(&CategoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = CategoryFilter {
            category_type: Some("topic".to_string()),
            parent_id: Some(C1.to_string()),
            ..Default::default()
        };
        let categories = repo().find_with_filters(&filter).await.unwrap();
        assert_eq!(keys(&categories), vec![C2]);
    }

    #[tokio::test]
    async fn test_product_filter() {
        let filter = CategoryFilter {
            enabled: Some(true),
            ..Default::default()
        }
        .in_product(P2);
        assert!(repo().find_with_filters(&filter).await.unwrap().is_empty());

        let filter = CategoryFilter::default().in_product(P2);
        let categories = repo().find_with_filters(&filter).await.unwrap();
        assert_eq!(keys(&categories), vec![C3]);

        let filter = CategoryFilter::default().in_product(MISSING);
        assert!(repo().find_with_filters(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_fields_do_not_break_listing() {
        let store = seeded_store();
        store.insert(
            schema::CATEGORIES,
            doc! {
                "_id": id::parse(C_EMPTY).unwrap(),
                "name": "Imported",
                "description": null,
                "type": "topic",
                "parent_id": null,
                "total_questions": null,
                "enabled": true,
                "created_at": bson::DateTime::now(),
                "updated_at": bson::DateTime::now(),
            },
        );
        let repo = CategoryRepository::new(store);

        let all = repo.find_with_filters(&CategoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let imported = repo.find_by_id(C_EMPTY).await.unwrap();
        assert_eq!(imported.description, "");
        assert_eq!(imported.total_questions, 0);
        assert!(imported.is_root());
    }
}
