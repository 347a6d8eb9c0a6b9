use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};

use crate::config::Config;

pub const SESSION_COOKIE: &str = "token";

/// GET / - liveness probe
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("linkup is sitting")
}

/// GET /logout - expires the session cookie
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Session",
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub async fn logout(config: web::Data<Config>) -> HttpResponse {
    let same_site = if config.production {
        SameSite::None
    } else {
        SameSite::Strict
    };

    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .secure(config.production)
        .same_site(same_site)
        .finish();
    cookie.make_removal();

    log::info!("👋 GET /logout - clearing session cookie");

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "success": true }))
}
