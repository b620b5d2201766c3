use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, Incident, User};
use beacon_result::Result;

/// # My Incidents
///
/// Fetch every report the caller has filed, newest first, regardless
/// of status.
#[openapi(tag = "Incidents")]
#[get("/mine")]
pub async fn list_mine(db: &State<Database>, user: User) -> Result<Json<Vec<Incident>>> {
    Ok(Json(db.list_incidents_by_author(&user.id).await?))
}
