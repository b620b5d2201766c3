use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, Incident, PublicIncident};
use beacon_result::Result;

/// How many approved incidents the public feed shows
static RECENT_LIMIT: i64 = 20;

/// # Recent Incidents
///
/// Public feed of the most recently approved incidents, stripped of
/// reporter-identifying fields.
#[openapi(tag = "Incidents")]
#[get("/public/recent")]
pub async fn public_recent(db: &State<Database>) -> Result<Json<Vec<PublicIncident>>> {
    let incidents = db.list_latest_approved(RECENT_LIMIT).await?;
    Ok(Json(
        incidents.into_iter().map(Incident::into_public).collect(),
    ))
}
