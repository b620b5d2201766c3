use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{
    util::reference::Reference, AreaCode, AuditLogEntry, AuditTargetType, Database, User,
};
use beacon_result::Result;

/// # Remove Admin
///
/// Take an admin off an area, clearing the assignment on both sides.
#[openapi(tag = "Areas")]
#[delete("/<target>/admins/<admin_id>")]
pub async fn remove_admin(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    admin_id: &str,
) -> Result<Json<AreaCode>> {
    user.require_super_admin()?;

    let mut area = target.as_area_code(db).await?;
    area.remove_admin(db, admin_id).await?;

    AuditLogEntry::log(
        db,
        &user,
        "area_remove_admin",
        AuditTargetType::System,
        area.id.clone(),
        serde_json::json!({ "admin_id": admin_id }).to_string(),
    )
    .await;

    Ok(Json(area))
}
