use beacon_result::Result;

use crate::ReferenceDb;
use crate::{IncidentMessage, MessageReply};

use super::AbstractMessages;

fn same_pair(message: &IncidentMessage, user_a: &str, user_b: &str) -> bool {
    (message.sender_id == user_a && message.receiver_id == user_b)
        || (message.sender_id == user_b && message.receiver_id == user_a)
}

#[async_trait]
impl AbstractMessages for ReferenceDb {
    /// Insert a new message into the database
    async fn insert_message(&self, message: &IncidentMessage) -> Result<()> {
        let mut messages = self.messages.lock().await;
        if messages.contains_key(&message.id) {
            Err(create_database_error!("insert", "message"))
        } else {
            messages.insert(message.id.to_string(), message.clone());
            Ok(())
        }
    }

    /// Fetch a message by its id
    async fn fetch_message(&self, id: &str) -> Result<IncidentMessage> {
        let messages = self.messages.lock().await;
        messages
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownMessage))
    }

    /// Fetch the thread between two users on an incident, oldest first
    async fn fetch_thread(
        &self,
        incident_id: &str,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<IncidentMessage>> {
        let messages = self.messages.lock().await;
        let mut result: Vec<IncidentMessage> = messages
            .values()
            .filter(|message| message.incident_id == incident_id && same_pair(message, user_a, user_b))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    /// Fetch all messages a user sent or received
    async fn fetch_messages_for_user(&self, user_id: &str) -> Result<Vec<IncidentMessage>> {
        let messages = self.messages.lock().await;
        Ok(messages
            .values()
            .filter(|message| message.is_participant(user_id))
            .cloned()
            .collect())
    }

    /// Fetch the most recent message addressed to the given user
    /// on an incident, if any
    async fn fetch_latest_inbound(
        &self,
        incident_id: &str,
        receiver_id: &str,
    ) -> Result<Option<IncidentMessage>> {
        let messages = self.messages.lock().await;
        Ok(messages
            .values()
            .filter(|message| {
                message.incident_id == incident_id && message.receiver_id == receiver_id
            })
            .max_by(|a, b| a.id.cmp(&b.id))
            .cloned())
    }

    /// Append a reply to an existing message
    async fn append_reply(&self, message_id: &str, reply: &MessageReply) -> Result<()> {
        let mut messages = self.messages.lock().await;
        if let Some(message) = messages.get_mut(message_id) {
            message.replies.push(reply.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownMessage))
        }
    }

    /// Delete the thread between two users on an incident
    async fn delete_thread(&self, incident_id: &str, user_a: &str, user_b: &str) -> Result<()> {
        let mut messages = self.messages.lock().await;
        messages.retain(|_, message| {
            !(message.incident_id == incident_id && same_pair(message, user_a, user_b))
        });

        Ok(())
    }

    /// Delete every thread attached to an incident
    async fn delete_threads_for_incident(&self, incident_id: &str) -> Result<()> {
        let mut messages = self.messages.lock().await;
        messages.retain(|_, message| message.incident_id != incident_id);
        Ok(())
    }
}
