use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Database, Report, ReportStatus, User};
use beacon_result::{create_error, Result};

/// # List Reports
///
/// Fetch filed abuse reports, optionally filtered by status.
/// Restricted to moderators.
#[openapi(tag = "User Safety")]
#[get("/reports?<status>")]
pub async fn list_reports(
    db: &State<Database>,
    user: User,
    status: Option<String>,
) -> Result<Json<Vec<Report>>> {
    user.require_admin()?;

    let status = match status.as_deref() {
        None => None,
        Some("pending") => Some(ReportStatus::Pending),
        Some("reviewed") => Some(ReportStatus::Reviewed),
        Some("resolved") => Some(ReportStatus::Resolved),
        Some(_) => return Err(create_error!(InvalidProperty)),
    };

    Ok(Json(db.list_reports(status).await?))
}
