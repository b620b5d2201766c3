use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{
    util::reference::Reference, Database, IncidentMessage, Notification, NotificationKind, User,
};
use beacon_result::{create_error, Result};

/// # Message Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataSendMessage {
    /// Message content
    pub content: String,
    /// Receiving user, defaults to the incident's reporter; the
    /// reporter may omit it to answer whoever last contacted them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
}

/// # Send Message
///
/// Open or continue a private conversation about an incident.
#[openapi(tag = "Messaging")]
#[post("/<target>", data = "<data>")]
pub async fn send_message(
    db: &State<Database>,
    user: User,
    target: Reference<'_>,
    data: Json<DataSendMessage>,
) -> Result<Json<IncidentMessage>> {
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

    let incident = target.as_incident(db).await?;
    let message = IncidentMessage::send(db, &incident, &user, data.receiver_id, data.content).await?;

    Notification::emit(
        db,
        Some(message.receiver_id.clone()),
        "New message".to_string(),
        format!("{} sent you a message about \"{}\".", user.display_name, incident.title),
        NotificationKind::Message,
        Some(format!("/incidents/{}/messages", incident.id)),
    )
    .await;

    Ok(Json(message))
}
