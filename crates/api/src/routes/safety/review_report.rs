use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{util::reference::Reference, Database, Report, ReportAction, User};
use beacon_result::Result;

/// # Review Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataReviewReport {
    /// Verdict: dismiss (`none`), warn or suspend
    pub action: ReportAction,
    /// Reason shown to the offender, defaults to the report's reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Suspension length in days, indefinite when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_days: Option<i64>,
}

/// # Review Report
///
/// Conclude the review of an abuse report, optionally warning or
/// suspending the offender. Restricted to moderators.
#[openapi(tag = "User Safety")]
#[post("/reports/<target>/review", data = "<data>")]
pub async fn review_report(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataReviewReport>,
) -> Result<Json<Report>> {
    user.require_admin()?;

    let data = data.into_inner();
    let mut report = target.as_report(db).await?;
    report
        .review(db, &user, data.action, data.note, data.suspend_days)
        .await?;

    Ok(Json(report))
}
