use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{AuditLogEntry, AuditTargetType, Database, User};
use beacon_result::{create_error, Result};

/// # List Audit Entries
///
/// Fetch the trail of privileged actions, newest first, optionally
/// filtered by target kind. Restricted to moderators.
#[openapi(tag = "Audit")]
#[get("/?<target_type>")]
pub async fn list_audit(
    db: &State<Database>,
    user: User,
    target_type: Option<String>,
) -> Result<Json<Vec<AuditLogEntry>>> {
    user.require_admin()?;

    let filter = match target_type.as_deref() {
        None => None,
        Some("incident") => Some(AuditTargetType::Incident),
        Some("user") => Some(AuditTargetType::User),
        Some("report") => Some(AuditTargetType::Report),
        Some("system") => Some(AuditTargetType::System),
        Some(_) => return Err(create_error!(InvalidProperty)),
    };

    let entries = db.list_audit_logs().await?;
    Ok(Json(match filter {
        Some(target_type) => entries
            .into_iter()
            .filter(|entry| entry.target_type == target_type)
            .collect(),
        None => entries,
    }))
}
