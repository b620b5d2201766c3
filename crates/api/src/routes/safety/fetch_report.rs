use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, Database, Report, User};
use beacon_result::Result;

/// # Fetch Report
///
/// Retrieve one abuse report including its frozen chat snapshot.
/// Restricted to moderators.
#[openapi(tag = "User Safety")]
#[get("/reports/<target>")]
pub async fn fetch_report(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<Report>> {
    user.require_admin()?;

    Ok(Json(target.as_report(db).await?))
}
