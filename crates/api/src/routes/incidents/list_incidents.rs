use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, Incident, IncidentStatus, User};
use beacon_result::{create_error, Result};

/// # List Incidents
///
/// Fetch the incidents of an area, newest first. Members see approved
/// reports plus their own; moderators see every status.
#[openapi(tag = "Incidents")]
#[get("/?<area>")]
pub async fn list_incidents(
    db: &State<Database>,
    user: User,
    area: Option<String>,
) -> Result<Json<Vec<Incident>>> {
    let code = area
        .or_else(|| user.area_code.clone())
        .ok_or_else(|| create_error!(UnknownAreaCode))?
        .to_uppercase();

    let incidents = db.list_incidents_in_area(&code).await?;

    if user.is_admin() {
        return Ok(Json(incidents));
    }

    Ok(Json(
        incidents
            .into_iter()
            .filter(|incident| {
                incident.status == IncidentStatus::Approved || incident.author_id == user.id
            })
            .collect(),
    ))
}
