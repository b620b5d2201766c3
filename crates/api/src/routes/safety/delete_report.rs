use rocket::State;

use beacon_database::{util::reference::Reference, Database, User};
use beacon_result::Result;

/// # Delete Report
///
/// Permanently delete an abuse report and its snapshot. Restricted to
/// moderators.
#[openapi(tag = "User Safety")]
#[delete("/reports/<target>")]
pub async fn delete_report(db: &State<Database>, user: User, target: Reference<'_>) -> Result<()> {
    user.require_admin()?;

    let report = target.as_report(db).await?;
    report.delete(db, &user).await
}
