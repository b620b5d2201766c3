use beacon_result::Result;
use iso8601_timestamp::Timestamp;
use ulid::Ulid;

use crate::Database;

/// How long notifications stay visible
pub static NOTIFICATION_TTL_HOURS: u64 = 48;

auto_derived!(
    /// # Notification
    ///
    /// Short-lived notice shown to one user, or to everyone when no
    /// user is set
    pub struct Notification {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the recipient, absent for broadcasts
        #[serde(skip_serializing_if = "Option::is_none")]
        pub user_id: Option<String>,
        /// Short headline
        pub title: String,
        /// Longer body text
        pub body: String,
        /// What sort of event produced this notice
        pub kind: NotificationKind,
        /// Whether the recipient has opened it
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub read: bool,
        /// Optional in-app link
        #[serde(skip_serializing_if = "Option::is_none")]
        pub link: Option<String>,
        /// When this notice was created
        pub created_at: Timestamp,
    }

    /// Source of a notification
    #[derive(Copy, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum NotificationKind {
        /// An incident's status changed
        StatusChange,
        /// A new private message or reply arrived
        Message,
        /// Automated or manual moderation touched the user's content
        Moderation,
        /// Announcement from the operators
        System,
    }
);

/// Oldest id still inside the visibility window
pub fn expiry_cutoff() -> String {
    let cutoff = std::time::SystemTime::now()
        - std::time::Duration::from_secs(NOTIFICATION_TTL_HOURS * 3600);

    Ulid::from_datetime(cutoff).to_string()
}

impl Notification {
    /// Create and store a notification
    ///
    /// Notices are best-effort, failures are logged and swallowed so
    /// they can never fail the operation that produced them.
    pub async fn emit(
        db: &Database,
        user_id: Option<String>,
        title: String,
        body: String,
        kind: NotificationKind,
        link: Option<String>,
    ) {
        let notification = Notification {
            id: Ulid::new().to_string(),
            user_id,
            title,
            body,
            kind,
            read: false,
            link,
            created_at: Timestamp::now_utc(),
        };

        if let Err(error) = db.insert_notification(&notification).await {
            warn!("Failed to deliver notification: {error:?}");
        }
    }

    /// Mark this notification as read
    pub async fn mark_read(&mut self, db: &Database) -> Result<()> {
        db.mark_notification_read(&self.id).await?;
        self.read = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use iso8601_timestamp::Timestamp;
    use ulid::Ulid;

    use crate::{Notification, NotificationKind, User};

    #[async_std::test]
    async fn expired_notices_drop_out_of_listings() {
        database_test!(|db| async move {
            let user = User::create(
                &db,
                "recipient@example.com".to_string(),
                "hash".to_string(),
                "Recipient".to_string(),
                None,
            )
            .await
            .unwrap();

            // Backdate an id past the visibility window
            let stale = std::time::SystemTime::now()
                - std::time::Duration::from_secs(72 * 3600);
            db.insert_notification(&Notification {
                id: Ulid::from_datetime(stale).to_string(),
                user_id: Some(user.id.to_string()),
                title: "Old".to_string(),
                body: "Long gone.".to_string(),
                kind: NotificationKind::System,
                read: false,
                link: None,
                created_at: Timestamp::now_utc(),
            })
            .await
            .unwrap();

            Notification::emit(
                &db,
                Some(user.id.to_string()),
                "Fresh".to_string(),
                "Still visible.".to_string(),
                NotificationKind::System,
                None,
            )
            .await;

            let inbox = db.list_notifications_for_user(&user.id).await.unwrap();
            assert_eq!(inbox.len(), 1);
            assert_eq!(inbox[0].title, "Fresh");
        });
    }

    #[async_std::test]
    async fn notices_reach_their_recipient() {
        database_test!(|db| async move {
            let user = User::create(
                &db,
                "recipient@example.com".to_string(),
                "hash".to_string(),
                "Recipient".to_string(),
                None,
            )
            .await
            .unwrap();

            let other = User::create(
                &db,
                "other@example.com".to_string(),
                "hash".to_string(),
                "Other".to_string(),
                None,
            )
            .await
            .unwrap();

            Notification::emit(
                &db,
                Some(user.id.to_string()),
                "Status changed".to_string(),
                "Your report was approved.".to_string(),
                NotificationKind::StatusChange,
                None,
            )
            .await;

            Notification::emit(
                &db,
                None,
                "Maintenance".to_string(),
                "Scheduled downtime tonight.".to_string(),
                NotificationKind::System,
                None,
            )
            .await;

            // Personal notice plus the broadcast
            let inbox = db.list_notifications_for_user(&user.id).await.unwrap();
            assert_eq!(inbox.len(), 2);

            // Only the broadcast for everyone else
            let inbox = db.list_notifications_for_user(&other.id).await.unwrap();
            assert_eq!(inbox.len(), 1);
            assert_eq!(inbox[0].kind, NotificationKind::System);
        });
    }

    #[async_std::test]
    async fn read_notices_sink_below_unread() {
        database_test!(|db| async move {
            let user = User::create(
                &db,
                "reader@example.com".to_string(),
                "hash".to_string(),
                "Reader".to_string(),
                None,
            )
            .await
            .unwrap();

            Notification::emit(
                &db,
                Some(user.id.to_string()),
                "First".to_string(),
                "First notice.".to_string(),
                NotificationKind::System,
                None,
            )
            .await;

            Notification::emit(
                &db,
                Some(user.id.to_string()),
                "Second".to_string(),
                "Second notice.".to_string(),
                NotificationKind::System,
                None,
            )
            .await;

            let mut inbox = db.list_notifications_for_user(&user.id).await.unwrap();
            assert_eq!(inbox.len(), 2);

            inbox[0].mark_read(&db).await.unwrap();

            let inbox = db.list_notifications_for_user(&user.id).await.unwrap();
            assert!(!inbox[0].read);
            assert!(inbox[1].read);
        });
    }
}
