use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, Database, User, UserInfo};
use beacon_result::Result;

/// # Fetch User
///
/// Retrieve another user's information. Restricted to moderators.
#[openapi(tag = "Users")]
#[get("/<target>")]
pub async fn fetch_user(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<UserInfo>> {
    user.require_admin()?;

    let target = target.as_user(db).await?;
    Ok(Json(target.into_info()))
}
