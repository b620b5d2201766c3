use mongodb::options::FindOptions;

use beacon_result::Result;

use crate::MongoDb;
use crate::{models::notifications::expiry_cutoff, Notification};

use super::AbstractNotifications;

static COL: &str = "notifications";

#[async_trait]
impl AbstractNotifications for MongoDb {
    /// Insert a new notification into the database
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        query!(self, insert_one, COL, notification).map(|_| ())
    }

    /// Fetch a notification by its id
    async fn fetch_notification(&self, id: &str) -> Result<Notification> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch a user's visible notifications, including broadcasts
    ///
    /// Ulids sort chronologically, so the visibility window is an id
    /// range query
    async fn list_notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {
                "_id": {
                    "$gte": expiry_cutoff()
                },
                "$or": [
                    {
                        "user_id": user_id
                    },
                    {
                        "user_id": {
                            "$exists": false
                        }
                    }
                ]
            },
            FindOptions::builder()
                .sort(doc! {
                    "read": 1_i32,
                    "_id": -1_i32
                })
                .build()
        )
    }

    /// Mark a notification as read
    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        self.col::<Notification>(COL)
            .update_one(
                doc! {
                    "_id": id
                },
                doc! {
                    "$set": {
                        "read": true
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", COL))
    }
}
