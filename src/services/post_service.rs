// ==================== POSTS ====================
// Inserted with a server timestamp, listed newest first, deleted by id

use crate::{
    database::{DocumentStore, POSTS},
    models::{DeleteOutcome, InsertOutcome},
    utils::{json_to_document, AppError},
};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use serde_json::{Map, Value};

fn newest_first() -> Document {
    doc! { "timestamp": -1 }
}

pub async fn create_post(
    db: &dyn DocumentStore,
    post: &Map<String, Value>,
) -> Result<InsertOutcome, AppError> {
    let mut document = json_to_document(post)?;
    document.insert("timestamp", DateTime::now());
    db.insert_one(POSTS, document).await
}

pub async fn list_posts(db: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    db.find_all(POSTS, doc! {}, Some(newest_first())).await
}

pub async fn list_posts_by_author(
    db: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Document>, AppError> {
    db.find_all(POSTS, doc! { "author_email": email }, Some(newest_first()))
        .await
}

/// Fails with `AppError::InvalidId` when `id` is not an ObjectId hex string.
pub async fn delete_post(db: &dyn DocumentStore, id: &str) -> Result<DeleteOutcome, AppError> {
    let object_id = ObjectId::parse_str(id)?;
    db.delete_one(POSTS, doc! { "_id": object_id }).await
}
