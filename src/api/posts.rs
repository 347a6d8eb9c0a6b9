use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::{
    database::DocumentStore,
    models::InsertOutcome,
    services::post_service,
    utils::documents_to_json,
};

/// POST /posts - Cria post com timestamp do servidor
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    responses(
        (status = 201, description = "Post created", body = InsertOutcome),
        (status = 500, description = "Store error")
    )
)]
pub async fn create_post(
    db: web::Data<dyn DocumentStore>,
    post: web::Json<Map<String, Value>>,
) -> HttpResponse {
    log::info!("📝 POST /posts");

    match post_service::create_post(db.get_ref(), &post).await {
        Ok(result) => {
            log::info!("✅ Post created: {}", result.inserted_id);
            HttpResponse::Created().json(result)
        }
        Err(e) => {
            log::error!("❌ Error creating post: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create post" }))
        }
    }
}

/// GET /posts - Lista posts (mais recentes primeiro)
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    responses(
        (status = 200, description = "All posts, newest first"),
        (status = 500, description = "Store error")
    )
)]
pub async fn get_posts(db: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("📰 GET /posts");

    match post_service::list_posts(db.get_ref()).await {
        Ok(posts) => {
            log::info!("✅ Listed {} posts", posts.len());
            HttpResponse::Ok().json(documents_to_json(posts))
        }
        Err(e) => {
            log::error!("❌ Error listing posts: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch posts" }))
        }
    }
}

/// GET /posts/user/{email} - Lista posts de um autor
#[utoipa::path(
    get,
    path = "/posts/user/{email}",
    tag = "Posts",
    params(
        ("email" = String, Path, description = "Author email")
    ),
    responses(
        (status = 200, description = "The author's posts, newest first"),
        (status = 500, description = "Store error")
    )
)]
pub async fn get_user_posts(
    db: web::Data<dyn DocumentStore>,
    email: web::Path<String>,
) -> HttpResponse {
    log::info!("📰 GET /posts/user/{}", email);

    match post_service::list_posts_by_author(db.get_ref(), &email).await {
        Ok(posts) => HttpResponse::Ok().json(documents_to_json(posts)),
        Err(e) => {
            log::error!("❌ Error listing posts for {}: {}", email, e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to fetch user posts" }))
        }
    }
}

/// DELETE /posts/{id} - Remove post
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    params(
        ("id" = String, Path, description = "Post ObjectId (hex)")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "No post with this id"),
        (status = 500, description = "Store error or malformed id")
    )
)]
pub async fn delete_post(db: web::Data<dyn DocumentStore>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /posts/{}", id);

    match post_service::delete_post(db.get_ref(), &id).await {
        Ok(result) if result.deleted_count == 0 => {
            log::warn!("⚠️ Post {} not found", id);
            HttpResponse::NotFound().json(json!({ "error": "Post not found" }))
        }
        Ok(result) => {
            log::info!("✅ Post {} deleted", id);
            HttpResponse::Ok().json(json!({ "message": "Post deleted", "result": result }))
        }
        Err(e) => {
            log::error!("❌ Error deleting post {}: {}", id, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to delete post" }))
        }
    }
}
