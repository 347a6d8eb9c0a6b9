use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status that marks a pending access request.
pub const STATUS_REQUESTED: &str = "Requested";

/// Body of `PATCH /users/{email}`.
///
/// Fields missing from the body are written as `null`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub role: Option<Value>,
    pub ids: Option<Value>,
    #[serde(rename = "userEmail")]
    pub user_email: Option<Value>,
    #[serde(rename = "userName")]
    pub user_name: Option<Value>,
}
