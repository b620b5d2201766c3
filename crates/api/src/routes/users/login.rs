use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use beacon_database::{Database, Session, UserInfo};
use beacon_result::{create_error, Result};

use crate::util::passwords::verify_password;

/// # Login Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataLogin {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Friendly name for this session, e.g. the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
}

/// # Login Response
#[derive(Serialize, Debug, schemars::JsonSchema)]
pub struct ResponseLogin {
    /// Session token to present in `x-session-token`
    pub token: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// # Login
///
/// Exchange credentials for a session token.
#[openapi(tag = "Users")]
#[post("/login", data = "<data>")]
pub async fn login(db: &State<Database>, data: Json<DataLogin>) -> Result<Json<ResponseLogin>> {
    let data = data.into_inner();

    // Same error whether the account exists or not
    let user = db
        .fetch_user_by_email(&data.email.trim().to_lowercase())
        .await
        .map_err(|_| create_error!(InvalidCredentials))?;

    if !verify_password(&data.password, &user.password_hash) {
        return Err(create_error!(InvalidCredentials));
    }

    if user.is_suspended() {
        return Err(create_error!(Suspended));
    }

    let session = Session::create(
        db,
        &user,
        data.session_name.unwrap_or_else(|| "Unknown".to_string()),
    )
    .await?;

    Ok(Json(ResponseLogin {
        token: session.token,
        user: user.into_info(),
    }))
}
