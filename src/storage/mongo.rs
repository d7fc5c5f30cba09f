//! MongoDB storage implementation

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use super::DocumentStore;
use crate::Result;

/// MongoDB-backed document store
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect to `uri`, select `database` and verify the deployment answers a ping.
    ///
    /// `connect_timeout` bounds both socket connection and server selection.
    pub async fn connect(uri: &str, database: &str, connect_timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);
        if options.app_name.is_none() {
            options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        }

        let client = Client::with_options(options)?;
        let store = Self::new(client, database);
        store.ping().await?;

        tracing::info!("Connected to MongoDB database {}", database);
        Ok(store)
    }

    /// Wrap an already-configured driver client
    pub fn new(client: Client, database: &str) -> Self {
        let db = client.database(database);
        Self { client, db }
    }

    /// Round-trip a `ping` command to the selected database
    pub async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>> {
        let cursor = self.db.collection::<Document>(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        let document = self.db.collection::<Document>(collection).find_one(filter).await?;
        Ok(document)
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64> {
        let count = self
            .db
            .collection::<Document>(collection)
            .count_documents(filter)
            .await?;
        Ok(count)
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        tracing::info!("Disconnected from MongoDB database {}", self.db.name());
        Ok(())
    }
}
