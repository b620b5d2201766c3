use beacon_result::Result;

use crate::ReferenceDb;
use crate::{models::notifications::expiry_cutoff, Notification};

use super::AbstractNotifications;

#[async_trait]
impl AbstractNotifications for ReferenceDb {
    /// Insert a new notification into the database
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        let mut notifications = self.notifications.lock().await;
        if notifications.contains_key(&notification.id) {
            Err(create_database_error!("insert", "notification"))
        } else {
            notifications.insert(notification.id.to_string(), notification.clone());
            Ok(())
        }
    }

    /// Fetch a notification by its id
    async fn fetch_notification(&self, id: &str) -> Result<Notification> {
        let notifications = self.notifications.lock().await;
        notifications
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch a user's visible notifications, including broadcasts
    async fn list_notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        let cutoff = expiry_cutoff();
        let notifications = self.notifications.lock().await;
        let mut result: Vec<Notification> = notifications
            .values()
            .filter(|notification| {
                notification.id >= cutoff
                    && notification
                        .user_id
                        .as_deref()
                        .map(|id| id == user_id)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| a.read.cmp(&b.read).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    /// Mark a notification as read
    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        let mut notifications = self.notifications.lock().await;
        if let Some(notification) = notifications.get_mut(id) {
            notification.read = true;
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
