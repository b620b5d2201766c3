use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{util::reference::Reference, Database, Incident, User};
use beacon_result::Result;

/// # Importance Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataEditImportance {
    /// Whether this incident is pinned as important
    pub important: bool,
}

/// # Edit Importance
///
/// Pin or unpin an incident as important. Restricted to moderators.
#[openapi(tag = "Incidents")]
#[patch("/<target>/importance", data = "<data>")]
pub async fn edit_importance(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataEditImportance>,
) -> Result<Json<Incident>> {
    let mut incident = target.as_incident(db).await?;
    incident
        .moderate(db, &user, None, Some(data.into_inner().important))
        .await?;

    Ok(Json(incident))
}
