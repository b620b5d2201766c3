use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{util::reference::Reference, AreaCode, Database, User};
use beacon_result::Result;

/// # Recount Stats
///
/// Recompute an area's member and incident counters from the live
/// collections.
#[openapi(tag = "Areas")]
#[post("/<target>/recount")]
pub async fn recount_stats(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
) -> Result<Json<AreaCode>> {
    user.require_admin()?;

    let mut area = target.as_area_code(db).await?;
    area.recompute_stats(db).await?;
    Ok(Json(area))
}
