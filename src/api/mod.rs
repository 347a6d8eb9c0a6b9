use actix_cors::Cors;
use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header,
    web, HttpRequest, HttpResponse,
};

/// Builds a test service over the given store with the full route table.
#[cfg(test)]
macro_rules! test_app {
    ($store:expr) => {
        test_app!($store, crate::config::Config::for_tests())
    };
    ($store:expr, $config:expr) => {{
        let store: std::sync::Arc<dyn crate::database::DocumentStore> = $store;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::new($config))
                .configure(crate::api::routes),
        )
        .await
    }};
}

pub mod health;
pub mod posts;
pub mod session;
pub mod swagger;
pub mod users;

/// Credentialed CORS restricted to the configured origins; any request header is accepted.
pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec![header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}

/// Rejected JSON bodies answer with `{ "error": ... }` like every other failure.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️ Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "error": format!("Invalid request body: {}", err)
    }));
    InternalError::from_response(err, response).into()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(session::index))
        .route("/health", web::get().to(health::health_check))
        .route("/logout", web::get().to(session::logout))
        // Users
        .route("/users", web::get().to(users::get_users))
        .service(
            web::resource("/users/{email}")
                .route(web::get().to(users::get_user))
                .route(web::patch().to(users::update_user)),
        )
        .route("/user", web::put().to(users::save_user))
        // Posts
        .service(
            web::resource("/posts")
                .route(web::get().to(posts::get_posts))
                .route(web::post().to(posts::create_post)),
        )
        .route("/posts/user/{email}", web::get().to(posts::get_user_posts))
        .route("/posts/{id}", web::delete().to(posts::delete_post));
}
