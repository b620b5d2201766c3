use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, Database, Incident, IncidentStatus, User};
use beacon_result::{create_error, Result};

/// # Fetch Incident
///
/// Retrieve one incident. Members only see approved incidents and
/// their own reports; moderators see everything.
#[openapi(tag = "Incidents")]
#[get("/<target>")]
pub async fn fetch_incident(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<Incident>> {
    let incident = target.as_incident(db).await?;

    if !user.is_admin()
        && incident.author_id != user.id
        && incident.status != IncidentStatus::Approved
    {
        return Err(create_error!(UnknownIncident));
    }

    Ok(Json(incident))
}
