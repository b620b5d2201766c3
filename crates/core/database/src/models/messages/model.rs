use std::collections::HashMap;

use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::{Database, Incident, IncidentStatus, User};

auto_derived!(
    /// # Incident Message
    ///
    /// Private message between exactly two participants, anchored
    /// to one incident
    pub struct IncidentMessage {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the incident this conversation is about
        pub incident_id: String,
        /// Id of the sending user
        pub sender_id: String,
        /// Id of the receiving user
        pub receiver_id: String,
        /// Message content
        pub content: String,
        /// Replies appended to this message
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub replies: Vec<MessageReply>,
        /// When this message was sent
        pub created_at: Timestamp,
    }

    /// Reply appended to a message
    pub struct MessageReply {
        /// Id of the replying user
        pub sender_id: String,
        /// Reply content
        pub content: String,
        /// When this reply was sent
        pub created_at: Timestamp,
    }

    /// Summary of one conversation for the caller's inbox
    pub struct Conversation {
        /// Id of the incident the thread is about
        pub incident_id: String,
        /// Denormalized incident title
        pub incident_title: String,
        /// Denormalized incident status
        pub incident_status: IncidentStatus,
        /// Id of the other participant
        pub counterpart_id: String,
        /// Display name of the other participant
        pub counterpart_name: String,
        /// Most recent message in the thread
        pub last_message: IncidentMessage,
    }
);

impl IncidentMessage {
    /// Whether the given user is the sender or receiver
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// Send a message about an incident
    ///
    /// Messaging must still be open on the incident at send time. When
    /// the incident owner sends without naming a receiver, the receiver
    /// is whoever most recently messaged them on this incident.
    pub async fn send(
        db: &Database,
        incident: &Incident,
        sender: &User,
        receiver_id: Option<String>,
        content: String,
    ) -> Result<IncidentMessage> {
        if content.trim().is_empty() {
            return Err(create_error!(EmptyMessage));
        }

        if !incident.allow_messages || incident.status == IncidentStatus::ProblemSolved {
            return Err(create_error!(MessagesDisabled));
        }

        let receiver_id = match receiver_id {
            Some(id) => id,
            None => {
                if sender.id == incident.author_id {
                    // No ambiguous broadcast, the owner must have been
                    // contacted before they can send unaddressed
                    db.fetch_latest_inbound(&incident.id, &sender.id)
                        .await?
                        .map(|message| message.sender_id)
                        .ok_or_else(|| create_error!(NoRecipient))?
                } else {
                    incident.author_id.to_string()
                }
            }
        };

        if receiver_id == sender.id {
            return Err(create_error!(InvalidOperation));
        }

        // Make sure the receiver actually exists
        db.fetch_user(&receiver_id).await?;

        let message = IncidentMessage {
            id: ulid::Ulid::new().to_string(),
            incident_id: incident.id.to_string(),
            sender_id: sender.id.to_string(),
            receiver_id,
            content,
            replies: vec![],
            created_at: Timestamp::now_utc(),
        };

        db.insert_message(&message).await?;
        Ok(message)
    }

    /// Append a reply, only open to the two original participants
    ///
    /// Replies go through the same messaging gate as fresh sends.
    pub async fn reply(
        &mut self,
        db: &Database,
        sender: &User,
        content: String,
    ) -> Result<MessageReply> {
        if !self.is_participant(&sender.id) {
            return Err(create_error!(NotParticipant));
        }

        if content.trim().is_empty() {
            return Err(create_error!(EmptyMessage));
        }

        let incident = db.fetch_incident(&self.incident_id).await?;
        if !incident.allow_messages || incident.status == IncidentStatus::ProblemSolved {
            return Err(create_error!(MessagesDisabled));
        }

        let reply = MessageReply {
            sender_id: sender.id.to_string(),
            content,
            created_at: Timestamp::now_utc(),
        };

        db.append_reply(&self.id, &reply).await?;
        self.replies.push(reply.clone());
        Ok(reply)
    }

    /// Group the caller's messages into conversations, one per
    /// `(incident, counterpart)` pair, newest message first
    pub async fn list_conversations(db: &Database, user: &User) -> Result<Vec<Conversation>> {
        let messages = db.fetch_messages_for_user(&user.id).await?;

        let mut threads: HashMap<(String, String), IncidentMessage> = HashMap::new();
        for message in messages {
            let counterpart = if message.sender_id == user.id {
                message.receiver_id.clone()
            } else {
                message.sender_id.clone()
            };

            let key = (message.incident_id.clone(), counterpart);
            match threads.get(&key) {
                Some(existing) if existing.id > message.id => {}
                _ => {
                    threads.insert(key, message);
                }
            }
        }

        let mut conversations = Vec::with_capacity(threads.len());
        for ((incident_id, counterpart_id), last_message) in threads {
            let incident = db.fetch_incident(&incident_id).await?;
            let counterpart = db.fetch_user(&counterpart_id).await?;

            conversations.push(Conversation {
                incident_id,
                incident_title: incident.title,
                incident_status: incident.status,
                counterpart_id,
                counterpart_name: counterpart.display_name,
                last_message,
            });
        }

        conversations.sort_by(|a, b| b.last_message.id.cmp(&a.last_message.id));
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use beacon_result::ErrorType;

    use crate::{
        Capability, Incident, IncidentCategory, IncidentMessage, IncidentStatus, PartialUser, User,
    };

    async fn seed(db: &crate::Database) -> (User, User, User, Incident) {
        let owner = User::create(
            db,
            "owner@example.com".to_string(),
            "hash".to_string(),
            "Owner".to_string(),
            Some("AREA01".to_string()),
        )
        .await
        .unwrap();

        let neighbour = User::create(
            db,
            "neighbour@example.com".to_string(),
            "hash".to_string(),
            "Neighbour".to_string(),
            Some("AREA01".to_string()),
        )
        .await
        .unwrap();

        let passerby = User::create(
            db,
            "passerby@example.com".to_string(),
            "hash".to_string(),
            "Passerby".to_string(),
            Some("AREA01".to_string()),
        )
        .await
        .unwrap();

        let incident = Incident::create(
            db,
            &owner,
            "Bike stolen from the rack".to_string(),
            "Lock was cut sometime this afternoon.".to_string(),
            IncidentCategory::Theft,
            "Station square".to_string(),
            None,
            None,
            "AREA01".to_string(),
            None,
            true,
        )
        .await
        .unwrap();

        (owner, neighbour, passerby, incident)
    }

    #[async_std::test]
    async fn receiver_resolution_for_owner() {
        database_test!(|db| async move {
            let (owner, neighbour, _, incident) = seed(&db).await;

            // Nobody has contacted the owner yet
            let error =
                IncidentMessage::send(&db, &incident, &owner, None, "Anyone there?".to_string())
                    .await
                    .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NoRecipient));

            IncidentMessage::send(
                &db,
                &incident,
                &neighbour,
                None,
                "I saw someone around 3pm.".to_string(),
            )
            .await
            .unwrap();

            let message =
                IncidentMessage::send(&db, &incident, &owner, None, "What did they look like?".to_string())
                    .await
                    .unwrap();
            assert_eq!(message.receiver_id, neighbour.id);
        });
    }

    #[async_std::test]
    async fn replies_restricted_to_participants() {
        database_test!(|db| async move {
            let (owner, neighbour, passerby, incident) = seed(&db).await;

            let mut message = IncidentMessage::send(
                &db,
                &incident,
                &neighbour,
                None,
                "I saw something.".to_string(),
            )
            .await
            .unwrap();

            message
                .reply(&db, &owner, "Please tell me more.".to_string())
                .await
                .unwrap();

            let error = message
                .reply(&db, &passerby, "Me too!".to_string())
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotParticipant));

            let fetched = db.fetch_message(&message.id).await.unwrap();
            assert_eq!(fetched.replies.len(), 1);
        });
    }

    #[async_std::test]
    async fn replies_respect_closed_messaging() {
        database_test!(|db| async move {
            let (owner, neighbour, _, incident) = seed(&db).await;

            let mut message = IncidentMessage::send(
                &db,
                &incident,
                &neighbour,
                None,
                "I saw something.".to_string(),
            )
            .await
            .unwrap();

            let mut incident = db.fetch_incident(&incident.id).await.unwrap();
            incident
                .update(
                    &db,
                    crate::PartialIncident {
                        allow_messages: Some(false),
                        ..Default::default()
                    },
                    vec![],
                )
                .await
                .unwrap();

            let error = message
                .reply(&db, &owner, "Tell me more.".to_string())
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::MessagesDisabled));

            let fetched = db.fetch_message(&message.id).await.unwrap();
            assert!(fetched.replies.is_empty());
        });
    }

    #[async_std::test]
    async fn thread_delete_is_exact() {
        database_test!(|db| async move {
            let (owner, neighbour, passerby, incident) = seed(&db).await;

            let other_incident = Incident::create(
                &db,
                &owner,
                "Noise complaint".to_string(),
                "Loud music every night this week.".to_string(),
                IncidentCategory::Noise,
                "Back alley".to_string(),
                None,
                None,
                "AREA01".to_string(),
                None,
                true,
            )
            .await
            .unwrap();

            IncidentMessage::send(&db, &incident, &neighbour, None, "Hello".to_string())
                .await
                .unwrap();
            IncidentMessage::send(&db, &incident, &owner, None, "Hi".to_string())
                .await
                .unwrap();
            IncidentMessage::send(&db, &incident, &passerby, None, "Unrelated pair".to_string())
                .await
                .unwrap();
            IncidentMessage::send(&db, &other_incident, &neighbour, None, "Other incident".to_string())
                .await
                .unwrap();

            db.delete_thread(&incident.id, &owner.id, &neighbour.id)
                .await
                .unwrap();

            assert!(db
                .fetch_thread(&incident.id, &owner.id, &neighbour.id)
                .await
                .unwrap()
                .is_empty());

            // Other participant pairs and other incidents are untouched
            assert_eq!(
                db.fetch_thread(&incident.id, &owner.id, &passerby.id)
                    .await
                    .unwrap()
                    .len(),
                1
            );
            assert_eq!(
                db.fetch_thread(&other_incident.id, &owner.id, &neighbour.id)
                    .await
                    .unwrap()
                    .len(),
                1
            );
        });
    }

    #[async_std::test]
    async fn solved_incidents_close_messaging() {
        database_test!(|db| async move {
            let (owner, neighbour, _, incident) = seed(&db).await;

            let mut admin = User::create(
                &db,
                "admin@example.com".to_string(),
                "hash".to_string(),
                "Admin".to_string(),
                None,
            )
            .await
            .unwrap();
            admin
                .update(
                    &db,
                    PartialUser {
                        capabilities: Some(vec![Capability::Admin]),
                        ..Default::default()
                    },
                    vec![],
                )
                .await
                .unwrap();

            IncidentMessage::send(&db, &incident, &neighbour, None, "Hello".to_string())
                .await
                .unwrap();

            let mut incident = db.fetch_incident(&incident.id).await.unwrap();
            incident
                .moderate(&db, &admin, Some(IncidentStatus::ProblemSolved), None)
                .await
                .unwrap();

            // Conversations are gone and sending is refused
            assert!(db
                .fetch_thread(&incident.id, &owner.id, &neighbour.id)
                .await
                .unwrap()
                .is_empty());

            let error =
                IncidentMessage::send(&db, &incident, &neighbour, None, "Still there?".to_string())
                    .await
                    .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::MessagesDisabled));

            // Re-running the transition is harmless on an empty thread set
            let mut incident = db.fetch_incident(&incident.id).await.unwrap();
            incident
                .moderate(&db, &admin, Some(IncidentStatus::ProblemSolved), None)
                .await
                .unwrap();
        });
    }
}
