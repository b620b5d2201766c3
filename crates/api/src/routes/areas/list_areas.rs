use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{AreaCode, Database, User};
use beacon_result::Result;

/// # List Areas
///
/// Fetch all registered areas. Restricted to moderators.
#[openapi(tag = "Areas")]
#[get("/")]
pub async fn list_areas(db: &State<Database>, user: User) -> Result<Json<Vec<AreaCode>>> {
    user.require_admin()?;

    Ok(Json(db.list_area_codes().await?))
}
