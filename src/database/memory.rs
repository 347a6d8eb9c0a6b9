//! In-process `DocumentStore` used by the handler tests.
//!
//! Supports equality filters, `$set` updates with the driver's matched/modified
//! accounting, upserts and sorting on top-level fields.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::{id_to_string, AppError};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// A store whose every operation fails, for exercising 500 paths.
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.unavailable.store(true, AtomicOrdering::SeqCst);
        store
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(AppError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }
}

/// A `null` filter value also matches documents missing the field.
fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match doc.get(key) {
        Some(actual) => actual == expected,
        None => *expected == Bson::Null,
    })
}

fn set_fields(update: &Document) -> Result<&Document, AppError> {
    for key in update.keys() {
        if key != "$set" {
            return Err(AppError::InvalidDocument(format!("unsupported update operator {}", key)));
        }
    }
    update
        .get_document("$set")
        .map_err(|e| AppError::InvalidDocument(e.to_string()))
}

/// Applies `$set`, returning whether any stored value actually changed.
fn apply_set(doc: &mut Document, set: &Document) -> bool {
    let mut modified = false;
    for (key, value) in set {
        if key == "_id" {
            continue;
        }
        if doc.get(key) != Some(value) {
            doc.insert(key.clone(), value.clone());
            modified = true;
        }
    }
    modified
}

fn with_id(document: Document) -> (Bson, Document) {
    let id = document
        .get("_id")
        .cloned()
        .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

    let mut stored = Document::new();
    stored.insert("_id", id.clone());
    for (key, value) in document {
        if key != "_id" {
            stored.insert(key, value);
        }
    }
    (id, stored)
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(i) => Some(*i as f64),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None | Some(Bson::Null), None | Some(Bson::Null)) => Ordering::Equal,
        (None | Some(Bson::Null), _) => Ordering::Less,
        (_, None | Some(Bson::Null)) => Ordering::Greater,
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_number(x), as_number(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, AppError> {
        self.check_available()?;
        let collections = self.collections.read().await;

        let mut found: Vec<(usize, Document)> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .cloned()
                    .enumerate()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = sort {
            found.sort_by(|(ia, a), (ib, b)| {
                for (key, direction) in &sort {
                    let descending = as_number(direction).map(|d| d < 0.0).unwrap_or(false);
                    let ord = compare_bson(a.get(key), b.get(key));
                    let ord = if descending { ord.reverse() } else { ord };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    // Ties on a descending key list the later insert first.
                    if descending {
                        return ib.cmp(ia);
                    }
                }
                ia.cmp(ib)
            });
        }

        Ok(found.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, &filter)))
            .cloned())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, AppError> {
        self.check_available()?;
        let set = set_fields(&update)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(doc) = docs.iter_mut().find(|doc| matches(doc, &filter)) {
            let modified = apply_set(doc, set);
            return Ok(UpdateOutcome::new(1, modified as u64, None));
        }

        if !upsert {
            return Ok(UpdateOutcome::new(0, 0, None));
        }

        let mut seeded = Document::new();
        for (key, value) in &filter {
            if !key.starts_with('$') {
                seeded.insert(key.clone(), value.clone());
            }
        }
        apply_set(&mut seeded, set);
        let (id, stored) = with_id(seeded);
        docs.push(stored);

        Ok(UpdateOutcome::new(0, 0, Some(id_to_string(&id))))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertOutcome, AppError> {
        self.check_available()?;
        let (id, stored) = with_id(document);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);
        Ok(InsertOutcome::new(id_to_string(&id)))
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteOutcome, AppError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteOutcome::new(0));
        };

        match docs.iter().position(|doc| matches(doc, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteOutcome::new(1))
            }
            None => Ok(DeleteOutcome::new(0)),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime};

    #[tokio::test]
    async fn test_null_filter_matches_missing_field() {
        let store = MemoryStore::default();
        store
            .insert_one("users", doc! { "email": "ana@linkup.dev" })
            .await
            .unwrap();

        let found = store
            .find_one("users", doc! { "email": "ana@linkup.dev", "name": Bson::Null })
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = store
            .find_one("users", doc! { "email": "ana@linkup.dev", "name": "Ana" })
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_reports_matched_and_modified() {
        let store = MemoryStore::default();
        store
            .insert_one("users", doc! { "email": "ana@linkup.dev", "role": "member" })
            .await
            .unwrap();

        let same = store
            .update_one(
                "users",
                doc! { "email": "ana@linkup.dev" },
                doc! { "$set": { "role": "member" } },
                false,
            )
            .await
            .unwrap();
        assert_eq!((same.matched_count, same.modified_count), (1, 0));

        let changed = store
            .update_one(
                "users",
                doc! { "email": "ana@linkup.dev" },
                doc! { "$set": { "role": "admin" } },
                false,
            )
            .await
            .unwrap();
        assert_eq!((changed.matched_count, changed.modified_count), (1, 1));

        let none = store
            .update_one(
                "users",
                doc! { "email": "bob@linkup.dev" },
                doc! { "$set": { "role": "admin" } },
                false,
            )
            .await
            .unwrap();
        assert_eq!((none.matched_count, none.upserted_id), (0, None));
        assert_eq!(store.count("users").await, 1);
    }

    #[tokio::test]
    async fn test_upsert_seeds_document_from_filter() {
        let store = MemoryStore::default();
        let outcome = store
            .update_one(
                "users",
                doc! { "email": "ana@linkup.dev", "name": "Ana" },
                doc! { "$set": { "email": "ana@linkup.dev", "role": "member" } },
                true,
            )
            .await
            .unwrap();

        assert_eq!(outcome.upserted_count, 1);
        let stored = store
            .find_one("users", doc! { "email": "ana@linkup.dev" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "Ana");
        assert_eq!(stored.get_str("role").unwrap(), "member");
        assert_eq!(
            stored.get_object_id("_id").unwrap().to_hex(),
            outcome.upserted_id.unwrap()
        );
    }

    #[tokio::test]
    async fn test_descending_sort_with_filter() {
        let store = MemoryStore::default();
        for (author, millis) in [("ana", 1_000), ("bob", 2_000), ("ana", 3_000)] {
            store
                .insert_one(
                    "posts",
                    doc! { "author_email": author, "timestamp": DateTime::from_millis(millis) },
                )
                .await
                .unwrap();
        }

        let posts = store
            .find_all("posts", doc! { "author_email": "ana" }, Some(doc! { "timestamp": -1 }))
            .await
            .unwrap();
        let stamps: Vec<i64> = posts
            .iter()
            .map(|p| p.get_datetime("timestamp").unwrap().timestamp_millis())
            .collect();
        assert_eq!(stamps, vec![3_000, 1_000]);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::unavailable();
        assert!(store.ping().await.is_err());
        assert!(store.find_all("posts", doc! {}, None).await.is_err());
        assert!(store.insert_one("posts", doc! {}).await.is_err());
    }
}
