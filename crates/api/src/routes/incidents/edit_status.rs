use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{util::reference::Reference, Database, Incident, IncidentStatus, User};
use beacon_result::Result;

/// # Status Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataEditStatus {
    /// Target status
    pub status: IncidentStatus,
}

/// # Edit Status
///
/// Move an incident through the moderation pipeline. Which targets are
/// allowed depends on whether the caller is a moderator or the report's
/// owner.
#[openapi(tag = "Incidents")]
#[patch("/<target>/status", data = "<data>")]
pub async fn edit_status(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataEditStatus>,
) -> Result<Json<Incident>> {
    let mut incident = target.as_incident(db).await?;
    incident
        .moderate(db, &user, Some(data.into_inner().status), None)
        .await?;

    Ok(Json(incident))
}
