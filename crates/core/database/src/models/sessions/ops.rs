use beacon_result::Result;

use crate::Session;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractSessions: Sync + Send {
    /// Insert a new session into the database
    async fn insert_session(&self, session: &Session) -> Result<()>;

    /// Fetch a session by its bearer token
    async fn fetch_session_by_token(&self, token: &str) -> Result<Session>;

    /// Delete a session by its id
    async fn delete_session(&self, id: &str) -> Result<()>;

    /// Delete every session belonging to a user
    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<()>;
}
