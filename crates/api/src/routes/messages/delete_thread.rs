use rocket::State;

use beacon_database::{util::reference::Reference, Database, User};
use beacon_result::Result;

/// # Delete Thread
///
/// Delete the caller's conversation with another user about an
/// incident. Filed abuse reports keep their own frozen copy.
#[openapi(tag = "Messaging")]
#[delete("/<target>/thread/<user_id>")]
pub async fn delete_thread(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    user_id: &str,
) -> Result<()> {
    let incident = target.as_incident(db).await?;
    db.delete_thread(&incident.id, &user.id, user_id).await
}
