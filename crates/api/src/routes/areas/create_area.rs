use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use validator::Validate;

use beacon_database::{AreaCode, AuditLogEntry, AuditTargetType, Database, User};
use beacon_result::{create_error, Result};

/// # Area Data
#[derive(Validate, Deserialize, schemars::JsonSchema)]
pub struct DataCreateArea {
    /// Human-readable neighbourhood name
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Optional code prefix, one or two characters
    #[validate(length(min = 1, max = 2))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// # Create Area
///
/// Register a new neighbourhood and generate its unique code.
/// Restricted to super-admins.
#[openapi(tag = "Areas")]
#[post("/", data = "<data>")]
pub async fn create_area(
    db: &State<Database>,
    user: User,
    data: Json<DataCreateArea>,
) -> Result<Json<AreaCode>> {
    user.require_super_admin()?;

    let data = data.into_inner();
    data.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    let area = AreaCode::create(db, data.name, data.prefix, user.id.clone()).await?;

    AuditLogEntry::log(
        db,
        &user,
        "area_create",
        AuditTargetType::System,
        area.id.clone(),
        serde_json::json!({ "code": area.code }).to_string(),
    )
    .await;

    Ok(Json(area))
}
