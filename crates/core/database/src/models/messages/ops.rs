use beacon_result::Result;

use crate::{IncidentMessage, MessageReply};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractMessages: Sync + Send {
    /// Insert a new message into the database
    async fn insert_message(&self, message: &IncidentMessage) -> Result<()>;

    /// Fetch a message by its id
    async fn fetch_message(&self, id: &str) -> Result<IncidentMessage>;

    /// Fetch the thread between two users on an incident, oldest first
    ///
    /// The participant pair is unordered
    async fn fetch_thread(
        &self,
        incident_id: &str,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<IncidentMessage>>;

    /// Fetch all messages a user sent or received
    async fn fetch_messages_for_user(&self, user_id: &str) -> Result<Vec<IncidentMessage>>;

    /// Fetch the most recent message addressed to the given user
    /// on an incident, if any
    async fn fetch_latest_inbound(
        &self,
        incident_id: &str,
        receiver_id: &str,
    ) -> Result<Option<IncidentMessage>>;

    /// Append a reply to an existing message
    async fn append_reply(&self, message_id: &str, reply: &MessageReply) -> Result<()>;

    /// Delete the thread between two users on an incident
    async fn delete_thread(&self, incident_id: &str, user_a: &str, user_b: &str) -> Result<()>;

    /// Delete every thread attached to an incident
    async fn delete_threads_for_incident(&self, incident_id: &str) -> Result<()>;
}
