use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

use beacon_database::Database;
use beacon_result::Result;

/// # Platform Statistics
#[derive(Serialize, Debug, schemars::JsonSchema)]
pub struct ResponseStats {
    /// Registered neighbourhoods
    pub areas: usize,
    /// Total incidents ever filed
    pub incidents: u64,
    /// Registered members
    pub users: usize,
}

/// # Fetch Stats
///
/// Public aggregate counters, no per-user data.
#[openapi(tag = "Core")]
#[get("/")]
pub async fn fetch_stats(db: &State<Database>) -> Result<Json<ResponseStats>> {
    let areas = db.list_area_codes().await?;
    let users = db.list_users().await?;

    let mut incidents = 0;
    for area in &areas {
        incidents += db.count_incidents_in_area(&area.code).await?;
    }

    Ok(Json(ResponseStats {
        areas: areas.len(),
        incidents,
        users: users.len(),
    }))
}
