// ==================== USER PROFILES ====================
// Users are keyed by email, created by upsert and never deleted

use crate::{
    database::{DocumentStore, USERS},
    models::{UpdateOutcome, UpdateUserRequest, STATUS_REQUESTED},
    utils::{json_to_document, AppError},
};
use mongodb::bson::{self, doc, Bson, Document};
use serde_json::{Map, Value};

/// What `PUT /user` did with the submitted profile.
#[derive(Debug)]
pub enum SaveUserResult {
    /// A matching user exists and was returned unchanged.
    Existing(Document),
    /// A matching user exists and its status was set to the requested value.
    StatusUpdated(UpdateOutcome),
    /// No user matched; the profile was upserted.
    Created(UpdateOutcome),
}

fn to_bson_or_null(value: Option<&Value>) -> Result<Bson, AppError> {
    match value {
        Some(value) => Ok(bson::to_bson(value)?),
        None => Ok(Bson::Null),
    }
}

pub async fn list_users(db: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    db.find_all(USERS, doc! {}, None).await
}

pub async fn get_user(db: &dyn DocumentStore, email: &str) -> Result<Option<Document>, AppError> {
    db.find_one(USERS, doc! { "email": email }).await
}

/// Replaces the profile fields of the user with the given email.
///
/// The caller tells "no such user" (`matched_count == 0`) apart from
/// "nothing changed" (`modified_count == 0`).
pub async fn update_user(
    db: &dyn DocumentStore,
    email: &str,
    request: &UpdateUserRequest,
) -> Result<UpdateOutcome, AppError> {
    let role = to_bson_or_null(request.role.as_ref())?;
    let ids = to_bson_or_null(request.ids.as_ref())?;
    let user_email = to_bson_or_null(request.user_email.as_ref())?;
    let user_name = to_bson_or_null(request.user_name.as_ref())?;

    let update = doc! {
        "$set": {
            "role": role,
            "ids": ids,
            "userEmail": user_email,
            "userName": user_name,
        }
    };

    db.update_one(USERS, doc! { "email": email }, update, false).await
}

/// Registers a user or records an access request.
///
/// Existing users are matched on both `email` and `name` (the submitted
/// `displayName`).
pub async fn save_user(
    db: &dyn DocumentStore,
    user: &Map<String, Value>,
) -> Result<SaveUserResult, AppError> {
    let email = to_bson_or_null(user.get("email"))?;
    let name = to_bson_or_null(user.get("displayName"))?;
    let query = doc! { "email": email, "name": name };

    if let Some(existing) = db.find_one(USERS, query.clone()).await? {
        let status = user.get("status").and_then(Value::as_str);
        if status == Some(STATUS_REQUESTED) {
            let update = doc! { "$set": { "status": STATUS_REQUESTED } };
            let outcome = db.update_one(USERS, query, update, false).await?;
            return Ok(SaveUserResult::StatusUpdated(outcome));
        }
        return Ok(SaveUserResult::Existing(existing));
    }

    let mut fields = json_to_document(user)?;
    fields.insert("timestamp", chrono::Utc::now().timestamp_millis());

    let outcome = db
        .update_one(USERS, query, doc! { "$set": fields }, true)
        .await?;
    Ok(SaveUserResult::Created(outcome))
}
