use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{AreaCode, AreaCodeValidation, Database};
use beacon_result::Result;

/// # Validate Code
///
/// Check whether an area code exists and is open for registration.
/// Public, used by the signup form.
#[openapi(tag = "Areas")]
#[get("/validate/<code>")]
pub async fn validate_code(
    db: &State<Database>,
    code: &str,
) -> Result<Json<AreaCodeValidation>> {
    Ok(Json(AreaCode::validate(db, code).await))
}
