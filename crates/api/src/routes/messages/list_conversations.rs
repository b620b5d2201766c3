use rocket::serde::json::Json;
use rocket::State;

use beacon_database::{Conversation, Database, IncidentMessage, User};
use beacon_result::Result;

/// # List Conversations
///
/// Fetch the caller's inbox, one entry per incident/counterpart pair,
/// most recent first.
#[openapi(tag = "Messaging")]
#[get("/conversations")]
pub async fn list_conversations(
    db: &State<Database>,
    user: User,
) -> Result<Json<Vec<Conversation>>> {
    Ok(Json(IncidentMessage::list_conversations(db, &user).await?))
}
