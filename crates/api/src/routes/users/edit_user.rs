use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{
    iso8601_timestamp::{Duration, Timestamp},
    util::reference::Reference,
    AuditLogEntry, AuditTargetType, Capability, Database, FieldsUser, PartialUser, User, UserInfo,
};
use beacon_result::{create_error, Result};

/// # User Edit Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataEditUser {
    /// New capability set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,
    /// Suspend or unsuspend the account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    /// Suspension length in days, indefinite when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_days: Option<i64>,
    /// Fields to remove from the user object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<Vec<FieldsUser>>,
}

/// # Edit User
///
/// Change another user's capabilities or suspension. Restricted to
/// moderators; granting the super-admin capability additionally
/// requires the caller to hold it.
#[openapi(tag = "Users")]
#[patch("/<target>", data = "<data>")]
pub async fn edit_user(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataEditUser>,
) -> Result<Json<UserInfo>> {
    user.require_admin()?;

    let data = data.into_inner();
    let mut target = target.as_user(db).await?;

    if let Some(capabilities) = &data.capabilities {
        let granting_super_admin = capabilities.contains(&Capability::SuperAdmin)
            && !target.has_capability(Capability::SuperAdmin);

        if granting_super_admin {
            user.require_super_admin()?;
        }
    }

    if data.suspended == Some(true) && target.id == user.id {
        return Err(create_error!(InvalidOperation));
    }

    let partial = PartialUser {
        capabilities: data.capabilities,
        suspended: data.suspended,
        suspended_until: match data.suspended {
            Some(true) => data
                .suspend_days
                .map(|days| Timestamp::now_utc() + Duration::days(days)),
            _ => None,
        },
        ..Default::default()
    };

    let mut remove = data.remove.unwrap_or_default();
    if data.suspended == Some(false) {
        remove.push(FieldsUser::SuspendedUntil);
    }

    target.update(db, partial, remove).await?;

    AuditLogEntry::log(
        db,
        &user,
        "user_edit",
        AuditTargetType::User,
        target.id.clone(),
        serde_json::json!({
            "capabilities": target.capabilities,
            "suspended": target.suspended,
        })
        .to_string(),
    )
    .await;

    Ok(Json(target.into_info()))
}
