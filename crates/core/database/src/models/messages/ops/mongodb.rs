use mongodb::options::{FindOneOptions, FindOptions};

use beacon_result::Result;

use crate::MongoDb;
use crate::{IncidentMessage, MessageReply};

use super::AbstractMessages;

static COL: &str = "messages";

fn pair_filter(incident_id: &str, user_a: &str, user_b: &str) -> bson::Document {
    doc! {
        "incident_id": incident_id,
        "$or": [
            {
                "sender_id": user_a,
                "receiver_id": user_b
            },
            {
                "sender_id": user_b,
                "receiver_id": user_a
            }
        ]
    }
}

#[async_trait]
impl AbstractMessages for MongoDb {
    /// Insert a new message into the database
    async fn insert_message(&self, message: &IncidentMessage) -> Result<()> {
        query!(self, insert_one, COL, message).map(|_| ())
    }

    /// Fetch a message by its id
    async fn fetch_message(&self, id: &str) -> Result<IncidentMessage> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(UnknownMessage))
    }

    /// Fetch the thread between two users on an incident, oldest first
    async fn fetch_thread(
        &self,
        incident_id: &str,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<IncidentMessage>> {
        query!(
            self,
            find_with_options,
            COL,
            pair_filter(incident_id, user_a, user_b),
            FindOptions::builder()
                .sort(doc! {
                    "_id": 1_i32
                })
                .build()
        )
    }

    /// Fetch all messages a user sent or received
    async fn fetch_messages_for_user(&self, user_id: &str) -> Result<Vec<IncidentMessage>> {
        query!(
            self,
            find,
            COL,
            doc! {
                "$or": [
                    {
                        "sender_id": user_id
                    },
                    {
                        "receiver_id": user_id
                    }
                ]
            }
        )
    }

    /// Fetch the most recent message addressed to the given user
    /// on an incident, if any
    async fn fetch_latest_inbound(
        &self,
        incident_id: &str,
        receiver_id: &str,
    ) -> Result<Option<IncidentMessage>> {
        query!(
            self,
            find_one_with_options,
            COL,
            doc! {
                "incident_id": incident_id,
                "receiver_id": receiver_id
            },
            FindOneOptions::builder()
                .sort(doc! {
                    "_id": -1_i32
                })
                .build()
        )
    }

    /// Append a reply to an existing message
    async fn append_reply(&self, message_id: &str, reply: &MessageReply) -> Result<()> {
        self.col::<IncidentMessage>(COL)
            .update_one(
                doc! {
                    "_id": message_id
                },
                doc! {
                    "$push": {
                        "replies": bson::to_bson(reply)
                            .map_err(|_| create_database_error!("to_bson", COL))?
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", COL))
    }

    /// Delete the thread between two users on an incident
    async fn delete_thread(&self, incident_id: &str, user_a: &str, user_b: &str) -> Result<()> {
        query!(
            self,
            delete_many,
            COL,
            pair_filter(incident_id, user_a, user_b)
        )
        .map(|_| ())
    }

    /// Delete every thread attached to an incident
    async fn delete_threads_for_incident(&self, incident_id: &str) -> Result<()> {
        query!(
            self,
            delete_many,
            COL,
            doc! {
                "incident_id": incident_id
            }
        )
        .map(|_| ())
    }
}
