use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use validator::Validate;

use beacon_database::{Database, User, UserInfo};
use beacon_result::{create_error, Error, Result};

use crate::util::passwords::hash_password;

/// # Signup Data
#[derive(Validate, Deserialize, schemars::JsonSchema)]
pub struct DataSignup {
    /// Email address
    #[validate(email)]
    pub email: String,
    /// Password
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    /// Name shown to other members
    #[validate(length(min = 1, max = 32))]
    pub display_name: String,
    /// Area code of the caller's neighbourhood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
}

/// # Create Account
///
/// Register a new member account.
#[openapi(tag = "Users")]
#[post("/", data = "<data>")]
pub async fn signup(db: &State<Database>, data: Json<DataSignup>) -> Result<Json<UserInfo>> {
    let data = data.into_inner();
    data.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    let config = beacon_config::config().await;
    if !config.api.registration.open {
        return Err(create_error!(InvalidOperation));
    }

    // Home area must be a real, active code
    let area_code = match data.area_code {
        Some(code) => {
            let area = db
                .fetch_area_code_by_code(&code.to_uppercase())
                .await
                .map_err(|_: Error| create_error!(UnknownAreaCode))?;

            if !area.active {
                return Err(create_error!(UnknownAreaCode));
            }

            Some(area.code)
        }
        None => None,
    };

    let password_hash = hash_password(&data.password)?;
    let user = User::create(db, data.email, password_hash, data.display_name, area_code).await?;

    Ok(Json(user.into_info()))
}
