use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use beacon_database::{Database, Incident, IncidentStatus, User};
use beacon_result::{create_error, Result};

/// # Bulk Moderation Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataBulkModerate {
    /// Incidents to change
    pub ids: Vec<String>,
    /// Target status, if changing status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
    /// Target importance, if changing importance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
}

/// # Bulk Moderation Response
#[derive(Serialize, Debug, schemars::JsonSchema)]
pub struct ResponseBulkModerate {
    /// How many incidents were actually changed
    pub affected: usize,
}

/// # Bulk Moderate
///
/// Apply one status or importance change to many incidents at once.
/// Unknown ids are skipped rather than failing the batch.
#[openapi(tag = "Incidents")]
#[post("/bulk", data = "<data>")]
pub async fn bulk_moderate(
    db: &State<Database>,
    user: User,
    data: Json<DataBulkModerate>,
) -> Result<Json<ResponseBulkModerate>> {
    user.require_admin()?;

    let data = data.into_inner();

    let config = beacon_config::config().await;
    if data.ids.len() > config.features.limits.bulk_batch {
        return Err(create_error!(FailedValidation {
            error: format!(
                "at most {} incidents per batch",
                config.features.limits.bulk_batch
            )
        }));
    }

    let affected =
        Incident::bulk_moderate(db, &user, &data.ids, data.status, data.important).await?;

    Ok(Json(ResponseBulkModerate { affected }))
}
