use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, MaybeUser, Notification};
use beacon_result::Result;

/// # List Notifications
///
/// Fetch the caller's visible notifications, unread first. Anonymous
/// callers get an empty list instead of an error.
#[openapi(tag = "Notifications")]
#[get("/")]
pub async fn list_notifications(
    db: &State<Database>,
    user: MaybeUser,
) -> Result<Json<Vec<Notification>>> {
    match user.0 {
        Some(user) => Ok(Json(db.list_notifications_for_user(&user.id).await?)),
        None => Ok(Json(vec![])),
    }
}
