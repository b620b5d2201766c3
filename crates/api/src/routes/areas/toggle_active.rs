use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, AreaCode, Database, User};
use beacon_result::Result;

/// # Toggle Active
///
/// Open or close an area for registrations and new incidents.
#[openapi(tag = "Areas")]
#[post("/<target>/toggle")]
pub async fn toggle_active(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<AreaCode>> {
    user.require_super_admin()?;

    let mut area = target.as_area_code(db).await?;
    area.toggle_active(db).await?;
    Ok(Json(area))
}
