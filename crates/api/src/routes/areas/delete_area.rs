use rocket::State;

use beacon_database::{
    util::reference::Reference, AuditLogEntry, AuditTargetType, Database, User,
};
use beacon_result::Result;

/// # Delete Area
///
/// Remove an area from the registry. Refused while any member or
/// incident still references its code.
#[openapi(tag = "Areas")]
#[delete("/<target>")]
pub async fn delete_area(db: &State<Database>, user: User, target: Reference<'_>) -> Result<()> {
    user.require_super_admin()?;

    let area = target.as_area_code(db).await?;
    let area_id = area.id.clone();
    let code = area.code.clone();
    area.delete(db).await?;

    AuditLogEntry::log(
        db,
        &user,
        "area_delete",
        AuditTargetType::System,
        area_id,
        serde_json::json!({ "code": code }).to_string(),
    )
    .await;

    Ok(())
}
