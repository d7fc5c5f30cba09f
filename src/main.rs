//! StudyDeck CLI - read-only lookups against a study content database

use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use studydeck::config::{self, StudyDeckConfig};
use studydeck::ui::{self, Icons};
use studydeck::{CategoryFilter, FlashcardFilter, ProductFilter, StudyClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "studydeck")]
#[command(version)]
#[command(about = "Read-only lookups over flashcards, categories and products")]
#[command(long_about = r#"
StudyDeck reads flashcards, categories and products from MongoDB and
follows the join collections between them.

Example usage:
  studydeck init
  studydeck flashcards --category 65a1f0c2e4b0a1b2c3d4e5c1 --tag algebra
  studydeck categories --products 65a1f0c2e4b0a1b2c3d4e5a1
  studydeck product 65a1f0c2e4b0a1b2c3d4e5a1 --json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// MongoDB connection string (overrides the config file)
    #[arg(long, global = true)]
    uri: Option<String>,

    /// Database name (overrides the config file)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter studydeck.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show document counts for every collection
    Stats,

    /// Show one flashcard
    Flashcard {
        /// Flashcard ID
        id: String,
    },

    /// List flashcards by ids, by categories, or by filter
    Flashcards(FlashcardArgs),

    /// Show one category
    Category {
        /// Category ID
        id: String,
    },

    /// List categories by ids, by flashcards, by products, or by filter
    Categories(CategoryArgs),

    /// Show one product
    Product {
        /// Product ID
        id: String,
    },

    /// List products by ids, by categories, or by filter
    Products(ProductArgs),
}

#[derive(Args)]
#[command(group = ArgGroup::new("filters").multiple(true).args(["category", "difficulty", "language", "verified", "enabled", "tags"]))]
struct FlashcardArgs {
    /// Look up these flashcard IDs
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["categories", "filters"])]
    ids: Vec<String>,

    /// Flashcards linked to any of these categories
    #[arg(long, value_delimiter = ',', conflicts_with = "filters")]
    categories: Vec<String>,

    /// Only flashcards linked to this category
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    difficulty: Option<String>,

    #[arg(long)]
    language: Option<String>,

    #[arg(long)]
    verified: Option<bool>,

    #[arg(long)]
    enabled: Option<bool>,

    /// Match flashcards carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Args)]
#[command(group = ArgGroup::new("filters").multiple(true).args(["product", "category_type", "parent", "name", "enabled"]))]
struct CategoryArgs {
    /// Look up these category IDs
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["flashcards", "products", "filters"])]
    ids: Vec<String>,

    /// Categories containing any of these flashcards
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["products", "filters"])]
    flashcards: Vec<String>,

    /// Categories included in any of these products
    #[arg(long, value_delimiter = ',', conflicts_with = "filters")]
    products: Vec<String>,

    /// Only categories included in this product
    #[arg(long)]
    product: Option<String>,

    /// Category type
    #[arg(long = "type")]
    category_type: Option<String>,

    /// Parent category ID
    #[arg(long)]
    parent: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    enabled: Option<bool>,
}

#[derive(Args)]
#[command(group = ArgGroup::new("filters").multiple(true).args(["product_type", "language", "area", "enabled"]))]
struct ProductArgs {
    /// Look up these product IDs
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["categories", "filters"])]
    ids: Vec<String>,

    /// Products including any of these categories
    #[arg(long, value_delimiter = ',', conflicts_with = "filters")]
    categories: Vec<String>,

    /// Product type
    #[arg(long = "type")]
    product_type: Option<String>,

    /// Supported language
    #[arg(long)]
    language: Option<String>,

    /// Area ID
    #[arg(long)]
    area: Option<i32>,

    #[arg(long)]
    enabled: Option<bool>,
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn emit<T: Serialize>(json: bool, what: &str, records: &[T], table: fn(&[T]) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&studydeck::output::to_json(records)?)?);
        return Ok(());
    }

    if records.is_empty() {
        ui::none_found(what);
    } else {
        println!("{}", table(records));
        ui::summary_row(&format!("Total {}:", what), &records.len().to_string());
    }
    Ok(())
}

fn emit_one<T: Serialize>(json: bool, icon: &str, record: T, table: fn(&[T]) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&studydeck::output::to_json(&record)?)?);
    } else {
        ui::header(icon, "Found");
        println!("{}", table(std::slice::from_ref(&record)));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    if let Commands::Init { force } = cli.command {
        config::write_config(&config_path, &StudyDeckConfig::template(), force)?;
        ui::success(&format!("Wrote {}", config_path.display()));
        return Ok(());
    }

    let file_config = config::load_config(Some(&config_path))?.unwrap_or_default();
    let client_config = file_config.to_client_config(cli.uri.as_deref(), cli.database.as_deref());
    tracing::debug!("Connecting to database {}", client_config.database);

    let client = StudyClient::connect(client_config).await?;
    run_and_close(client, cli.command, cli.json).await
}

/// Run `command`, then close the client. A close failure is logged so the
/// command's own outcome is what gets reported.
async fn run_and_close(client: StudyClient, command: Commands, json: bool) -> anyhow::Result<()> {
    let result = run(&client, command, json).await;
    if let Err(e) = client.close().await {
        tracing::warn!("Failed to close connection: {}", e);
    }
    result
}

async fn run(client: &StudyClient, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Init { .. } => anyhow::bail!("init does not need a database connection"),

        Commands::Stats => {
            let stats = client.stats().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                ui::header(Icons::STATS, "StudyDeck Statistics");
                println!("{}", ui::stats_table(&stats));
            }
        }

        Commands::Flashcard { id } => {
            let card = client.get_flashcard(&id).await?;
            emit_one(json, Icons::CARD, card, ui::flashcards_table)?;
        }

        Commands::Flashcards(args) => {
            let cards = if !args.ids.is_empty() {
                client.get_flashcards(&as_strs(&args.ids)).await?
            } else if !args.categories.is_empty() {
                client.get_flashcards_by_categories(&as_strs(&args.categories)).await?
            } else {
                let filter = FlashcardFilter {
                    category_id: args.category,
                    difficulty: args.difficulty,
                    language: args.language,
                    verified: args.verified,
                    enabled: args.enabled,
                    tags: args.tags,
                };
                client.list_flashcards(&filter).await?
            };
            emit(json, "flashcards", &cards, ui::flashcards_table)?;
        }

        Commands::Category { id } => {
            let category = client.get_category(&id).await?;
            emit_one(json, Icons::FOLDER, category, ui::categories_table)?;
        }

        Commands::Categories(args) => {
            let categories = if !args.ids.is_empty() {
                client.get_categories(&as_strs(&args.ids)).await?
            } else if !args.flashcards.is_empty() {
                client.get_categories_by_flashcards(&as_strs(&args.flashcards)).await?
            } else if !args.products.is_empty() {
                client.get_categories_by_products(&as_strs(&args.products)).await?
            } else {
                let filter = CategoryFilter {
                    product_id: args.product,
                    category_type: args.category_type,
                    parent_id: args.parent,
                    enabled: args.enabled,
                    name: args.name,
                };
                client.list_categories(&filter).await?
            };
            emit(json, "categories", &categories, ui::categories_table)?;
        }

        Commands::Product { id } => {
            let product = client.get_product(&id).await?;
            emit_one(json, Icons::PACKAGE, product, ui::products_table)?;
        }

        Commands::Products(args) => {
            let products = if !args.ids.is_empty() {
                client.get_products(&as_strs(&args.ids)).await?
            } else if !args.categories.is_empty() {
                client.get_products_by_categories(&as_strs(&args.categories)).await?
            } else {
                let filter = ProductFilter {
                    product_type: args.product_type,
                    language: args.language,
                    area_id: args.area,
                    enabled: args.enabled,
                };
                client.list_products(&filter).await?
            };
            emit(json, "products", &products, ui::products_table)?;
        }
    }

    Ok(())
}
