use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, Database, Incident, User};
use beacon_result::Result;

/// # Acknowledge Incident
///
/// Record that the caller has seen this incident.
#[openapi(tag = "Incidents")]
#[post("/<target>/acknowledge")]
pub async fn acknowledge(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<Incident>> {
    let mut incident = target.as_incident(db).await?;
    incident.acknowledge(db, &user.id).await?;
    Ok(Json(incident))
}
