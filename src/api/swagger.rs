use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "linkup API",
        version = "1.0.0",
        description = "User profiles, access requests and posts for the linkup front end.\n\n\
                       Documents are returned as stored; ObjectIds are hex strings and dates RFC 3339."
    ),
    paths(
        // Health & session
        crate::api::health::health_check,
        crate::api::session::logout,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::save_user,

        // Posts
        crate::api::posts::create_post,
        crate::api::posts::get_posts,
        crate::api::posts::get_user_posts,
        crate::api::posts::delete_post,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UpdateOutcome,
            crate::models::InsertOutcome,
            crate::models::DeleteOutcome,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and store connectivity."),
        (name = "Session", description = "Session cookie handling."),
        (name = "Users", description = "User lookup, profile updates and access requests, keyed by email."),
        (name = "Posts", description = "Post creation, newest-first listing and deletion."),
    )
)]
pub struct ApiDoc;
