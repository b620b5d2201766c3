use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{
    util::reference::Reference, Database, MessageReply, Notification, NotificationKind, User,
};
use beacon_result::{create_error, Result};

/// # Reply Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataReplyMessage {
    /// Reply content
    pub content: String,
}

/// # Reply To Message
///
/// Append a reply to a message. Only the two participants of the
/// conversation may reply.
#[openapi(tag = "Messaging")]
#[post("/reply/<target>", data = "<data>")]
pub async fn reply_message(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataReplyMessage>,
) -> Result<Json<MessageReply>> {
    if user.is_suspended() {
        return Err(create_error!(Suspended));
    }

    let data = data.into_inner();

    let config = beacon_config::config().await;
    if data.content.len() > config.features.limits.message_length {
        return Err(create_error!(FailedValidation {
            error: format!(
                "message must be at most {} characters",
                config.features.limits.message_length
            )
        }));
    }

    let mut message = target.as_message(db).await?;
    let reply = message.reply(db, &user, data.content).await?;

    // Tell the other side of the conversation
    let counterpart = if message.sender_id == user.id {
        message.receiver_id.clone()
    } else {
        message.sender_id.clone()
    };

    Notification::emit(
        db,
        Some(counterpart),
        "New reply".to_string(),
        format!("{} replied to a conversation.", user.display_name),
        NotificationKind::Message,
        Some(format!("/incidents/{}/messages", message.incident_id)),
    )
    .await;

    Ok(Json(reply))
}
