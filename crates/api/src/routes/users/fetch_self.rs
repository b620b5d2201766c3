use rocket::serde::json::Json;

use beacon_database::{User, UserInfo};
use beacon_result::Result;

/// # Fetch Self
///
/// Retrieve your user information.
#[openapi(tag = "Users")]
#[get("/@me")]
pub async fn fetch_self(user: User) -> Result<Json<UserInfo>> {
    Ok(Json(user.into_info()))
}
