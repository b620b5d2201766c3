use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{
    util::reference::Reference, AreaCode, AuditLogEntry, AuditTargetType, Database, User,
};
use beacon_result::Result;

/// # Admin Assignment Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataAssignAdmins {
    /// Ids of the users to put in charge of this area
    pub admin_ids: Vec<String>,
}

/// # Assign Admins
///
/// Put admin users in charge of an area. Every assignee must already
/// hold the admin capability.
#[openapi(tag = "Areas")]
#[put("/<target>/admins", data = "<data>")]
pub async fn assign_admins(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataAssignAdmins>,
) -> Result<Json<AreaCode>> {
    user.require_super_admin()?;

    let mut area = target.as_area_code(db).await?;
    let data = data.into_inner();

    area.assign_admins(db, data.admin_ids.clone()).await?;

    AuditLogEntry::log(
        db,
        &user,
        "area_assign_admins",
        AuditTargetType::System,
        area.id.clone(),
        serde_json::json!({ "admin_ids": data.admin_ids }).to_string(),
    )
    .await;

    Ok(Json(area))
}
