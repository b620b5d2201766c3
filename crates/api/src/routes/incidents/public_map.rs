use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, Incident, IncidentPin, IncidentStatus};
use beacon_result::Result;

/// # Incident Map
///
/// Public map pins for an area's approved incidents. Only incidents
/// whose reporter shared coordinates appear.
#[openapi(tag = "Incidents")]
#[get("/public/map/<area_code>")]
pub async fn public_map(db: &State<Database>, area_code: &str) -> Result<Json<Vec<IncidentPin>>> {
    let incidents = db
        .list_incidents_in_area(&area_code.to_uppercase())
        .await?;

    Ok(Json(
        incidents
            .into_iter()
            .filter(|incident| incident.status == IncidentStatus::Approved)
            .filter_map(Incident::into_pin)
            .collect(),
    ))
}
