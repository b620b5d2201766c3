use beacon_result::Result;
use iso8601_timestamp::Timestamp;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::{Database, User};

auto_derived!(
    /// Session holding an opaque bearer token
    pub struct Session {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the user this session belongs to
        pub user_id: String,
        /// Opaque bearer token
        pub token: String,
        /// Friendly client name
        pub name: String,
        /// When this session was created
        pub created_at: Timestamp,
    }
);

#[allow(clippy::disallowed_methods)]
impl Session {
    /// Open a new session for the given user
    pub async fn create(db: &Database, user: &User, name: String) -> Result<Session> {
        let token = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        let session = Session {
            id: ulid::Ulid::new().to_string(),
            user_id: user.id.to_string(),
            token,
            name,
            created_at: Timestamp::now_utc(),
        };

        db.insert_session(&session).await?;
        Ok(session)
    }
}
