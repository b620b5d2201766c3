use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, Database, Notification, User};
use beacon_result::{create_error, Result};

/// # Mark Read
///
/// Mark one of the caller's notifications as read.
#[openapi(tag = "Notifications")]
#[post("/<target>/read")]
pub async fn mark_read(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<Notification>> {
    let mut notification = target.as_notification(db).await?;

    // Broadcasts stay unread per user, personal notices must be yours
    match &notification.user_id {
        Some(recipient) if recipient == &user.id => {}
        _ => return Err(create_error!(NotFound)),
    }

    notification.mark_read(db).await?;
    Ok(Json(notification))
}
