use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use validator::Validate;

use beacon_database::{Database, Report, User};
use beacon_result::{create_error, Result};

/// # Report Data
#[derive(Validate, Deserialize, schemars::JsonSchema)]
pub struct DataFileReport {
    /// Incident whose conversation is being reported
    pub incident_id: String,
    /// User being reported
    pub reported_user_id: String,
    /// Why this complaint is being filed
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

/// # File Report
///
/// Report another user's conduct in a conversation. The thread is
/// copied into the report so the evidence survives even if the chat
/// is deleted later.
#[openapi(tag = "User Safety")]
#[post("/report", data = "<data>")]
pub async fn file_report(
    db: &State<Database>,
    user: User,
    data: Json<DataFileReport>,
) -> Result<Json<Report>> {
    let data = data.into_inner();
    data.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    let incident = db.fetch_incident(&data.incident_id).await?;
    let report = Report::file(
        db,
        &user,
        &incident,
        data.reported_user_id,
        data.reason,
    )
    .await?;

    Ok(Json(report))
}
