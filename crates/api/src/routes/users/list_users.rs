use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, User, UserInfo};
use beacon_result::Result;

/// # List Users
///
/// Fetch all registered users. Restricted to moderators.
#[openapi(tag = "Users")]
#[get("/")]
pub async fn list_users(db: &State<Database>, user: User) -> Result<Json<Vec<UserInfo>>> {
    user.require_admin()?;

    let users = db.list_users().await?;
    Ok(Json(users.into_iter().map(User::into_info).collect()))
}
