use rocket::State;

use beacon_database::{
    util::reference::Reference, AuditLogEntry, AuditTargetType, Database, User,
};
use beacon_result::Result;

/// # Delete Incident
///
/// Permanently delete an incident and its conversations. Restricted to
/// moderators.
#[openapi(tag = "Incidents")]
#[delete("/<target>")]
pub async fn delete_incident(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<()> {
    user.require_admin()?;

    let incident = target.as_incident(db).await?;
    let incident_id = incident.id.clone();
    incident.delete(db).await?;

    AuditLogEntry::log(
        db,
        &user,
        "incident_delete",
        AuditTargetType::Incident,
        incident_id,
        "{}".to_string(),
    )
    .await;

    Ok(())
}
