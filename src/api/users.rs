use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::{
    database::DocumentStore,
    models::UpdateUserRequest,
    services::user_service::{self, SaveUserResult},
    utils::{document_to_json, documents_to_json},
};

/// GET /users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Array of user documents"),
        (status = 500, description = "Store error")
    )
)]
pub async fn get_users(db: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("👥 GET /users");

    match user_service::list_users(db.get_ref()).await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(documents_to_json(users))
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch users" }))
        }
    }
}

/// GET /users/{email} - Busca usuário por email (null se não existir)
#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User document, or null when no user has this email"),
        (status = 500, description = "Store error")
    )
)]
pub async fn get_user(db: web::Data<dyn DocumentStore>, email: web::Path<String>) -> HttpResponse {
    log::info!("👤 GET /users/{}", email);

    match user_service::get_user(db.get_ref(), &email).await {
        Ok(user) => HttpResponse::Ok().json(user.map(document_to_json).unwrap_or(Value::Null)),
        Err(e) => {
            log::error!("❌ Error fetching user {}: {}", email, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch user" }))
        }
    }
}

/// PATCH /users/{email} - Atualiza role, ids, userEmail e userName
#[utoipa::path(
    patch,
    path = "/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "User matched but no field changed"),
        (status = 404, description = "No user with this email"),
        (status = 500, description = "Store error")
    )
)]
pub async fn update_user(
    db: web::Data<dyn DocumentStore>,
    email: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    log::info!("🔧 PATCH /users/{}", email);

    match user_service::update_user(db.get_ref(), &email, &request).await {
        Ok(result) if result.matched_count == 0 => {
            log::warn!("⚠️ User {} not found", email);
            HttpResponse::NotFound().json(json!({ "error": "User not found" }))
        }
        Ok(result) if result.modified_count == 0 => {
            log::warn!("⚠️ No changes for user {}", email);
            HttpResponse::BadRequest().json(json!({ "message": "No changes made to the user" }))
        }
        Ok(result) => {
            log::info!("✅ User {} updated", email);
            HttpResponse::Ok().json(json!({
                "message": "User updated successfully",
                "result": result
            }))
        }
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", email, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to update user" }))
        }
    }
}

/// PUT /user - Registra usuário ou pedido de acesso
///
/// Match on `{email, name: displayName}`. An existing user only changes when the
/// body carries `status: "Requested"`; otherwise it is returned as stored.
#[utoipa::path(
    put,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "Existing user document, or the update/upsert result"),
        (status = 500, description = "Store error")
    )
)]
pub async fn save_user(
    db: web::Data<dyn DocumentStore>,
    user: web::Json<Map<String, Value>>,
) -> HttpResponse {
    let email = user.get("email").and_then(Value::as_str).unwrap_or_default();
    log::info!("📝 PUT /user - {}", email);

    match user_service::save_user(db.get_ref(), &user).await {
        Ok(SaveUserResult::Existing(existing)) => {
            log::info!("✅ User {} already registered", email);
            HttpResponse::Ok().json(document_to_json(existing))
        }
        Ok(SaveUserResult::StatusUpdated(result)) => {
            log::info!("✅ Access requested for {}", email);
            HttpResponse::Ok().json(result)
        }
        Ok(SaveUserResult::Created(result)) => {
            log::info!("✅ User {} created", email);
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            log::error!("❌ Error saving user {}: {}", email, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save user" }))
        }
    }
}
