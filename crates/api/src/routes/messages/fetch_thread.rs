use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, Database, IncidentMessage, User};
use beacon_result::Result;

/// # Fetch Thread
///
/// Fetch the caller's conversation with another user about an
/// incident, oldest first.
#[openapi(tag = "Messaging")]
#[get("/<target>/thread/<user_id>")]
pub async fn fetch_thread(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    user_id: &str,
) -> Result<Json<Vec<IncidentMessage>>> {
    let incident = target.as_incident(db).await?;
    let thread = db.fetch_thread(&incident.id, &user.id, user_id).await?;
    Ok(Json(thread))
}
