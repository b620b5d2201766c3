use beacon_result::Result;

use crate::Notification;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractNotifications: Sync + Send {
    /// Insert a new notification into the database
    async fn insert_notification(&self, notification: &Notification) -> Result<()>;

    /// Fetch a notification by its id
    async fn fetch_notification(&self, id: &str) -> Result<Notification>;

    /// Fetch a user's visible notifications, including broadcasts
    ///
    /// Expired notices are filtered out, unread ones come first and
    /// each group is newest first
    async fn list_notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Mark a notification as read
    async fn mark_notification_read(&self, id: &str) -> Result<()>;
}
