use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database, IndexModel};
use std::time::Duration;

use crate::models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::{id_to_string, AppError};

#[cfg(test)]
pub mod memory;

pub const USERS: &str = "users";
pub const POSTS: &str = "posts";

/// Document-store operations the handlers depend on, addressed by collection name.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_all(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document)
        -> Result<Option<Document>, AppError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, AppError>;

    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<InsertOutcome, AppError>;

    async fn delete_one(&self, collection: &str, filter: Document)
        -> Result<DeleteOutcome, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { db };
        mongodb.ping().await?;
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the indexes backing the email lookups and timestamp-sorted feeds.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (USERS, doc! { "email": 1 }),
            (POSTS, doc! { "timestamp": -1 }),
            (POSTS, doc! { "author_email": 1, "timestamp": -1 }),
        ];

        for (collection, keys) in indexes {
            let index = IndexModel::builder().keys(keys.clone()).build();
            match self.db.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: {}({})", collection, keys),
                Err(e) => log::warn!("   ⚠️  Index {}({}) not created: {}", collection, keys, e),
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find_all(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, AppError> {
        let cursor = match sort {
            Some(sort) => self.db.collection::<Document>(collection).find(filter).sort(sort).await?,
            None => self.db.collection::<Document>(collection).find(filter).await?,
        };
        Ok(cursor.try_collect::<Vec<Document>>().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        Ok(self.db.collection::<Document>(collection).find_one(filter).await?)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, AppError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .update_one(filter, update)
            .upsert(upsert)
            .await?;

        Ok(UpdateOutcome::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id.as_ref().map(id_to_string),
        ))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertOutcome, AppError> {
        let result = self.db.collection::<Document>(collection).insert_one(document).await?;
        Ok(InsertOutcome::new(id_to_string(&result.inserted_id)))
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteOutcome, AppError> {
        let result = self.db.collection::<Document>(collection).delete_one(filter).await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
