use tabled::{settings::Style, Table, Tabled};

use crate::category::Category;
use crate::client::StoreStats;
use crate::flashcard::Flashcard;
use crate::product::Product;
use crate::ui::theme;

#[derive(Tabled)]
pub struct StatRow {
    #[tabled(rename = "Collection")]
    pub collection: String,
    #[tabled(rename = "Documents")]
    pub documents: u64,
}

#[derive(Tabled)]
pub struct FlashcardRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Lang")]
    pub language: String,
    #[tabled(rename = "Difficulty")]
    pub difficulty: String,
    #[tabled(rename = "Front")]
    pub front: String,
    #[tabled(rename = "Tags")]
    pub tags: String,
    #[tabled(rename = "Verified")]
    pub verified: String,
    #[tabled(rename = "Enabled")]
    pub enabled: String,
}

impl From<&Flashcard> for FlashcardRow {
    fn from(card: &Flashcard) -> Self {
        Self {
            id: card.id.to_hex(),
            language: card.language.clone(),
            difficulty: card.difficulty.clone(),
            front: truncate(&card.front, 48),
            tags: card.tags.join(", "),
            verified: theme().flag(card.verified),
            enabled: theme().flag(card.enabled),
        }
    }
}

#[derive(Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub category_type: String,
    #[tabled(rename = "Parent")]
    pub parent: String,
    #[tabled(rename = "Questions")]
    pub total_questions: i64,
    #[tabled(rename = "Enabled")]
    pub enabled: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name.clone(),
            category_type: category.category_type.clone(),
            parent: if category.is_root() {
                "-".to_string()
            } else {
                category.parent_id.clone().unwrap_or_default()
            },
            total_questions: category.total_questions,
            enabled: theme().flag(category.enabled),
        }
    }
}

#[derive(Tabled)]
pub struct ProductRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub product_type: String,
    #[tabled(rename = "Languages")]
    pub languages: String,
    #[tabled(rename = "Areas")]
    pub areas: String,
    #[tabled(rename = "Enabled")]
    pub enabled: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name.clone(),
            product_type: product.metadata.product_type.clone(),
            languages: product.metadata.languages.join(", "),
            areas: product
                .areas
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            enabled: theme().flag(product.enabled),
        }
    }
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn flashcards_table(cards: &[Flashcard]) -> String {
    render(cards.iter().map(FlashcardRow::from).collect())
}

pub fn categories_table(categories: &[Category]) -> String {
    render(categories.iter().map(CategoryRow::from).collect())
}

pub fn products_table(products: &[Product]) -> String {
    render(products.iter().map(ProductRow::from).collect())
}

pub fn stats_table(stats: &StoreStats) -> String {
    let rows = [
        ("flashcards", stats.flashcards),
        ("categories", stats.categories),
        ("products", stats.products),
        ("flashcard_categories", stats.flashcard_categories),
        ("category_products", stats.category_products),
    ]
    .into_iter()
    .map(|(collection, documents)| StatRow {
        collection: collection.to_string(),
        documents,
    })
    .collect();
    render(rows)
}
