use beacon_result::Result;

use crate::{FieldsUser, PartialUser, User, Warning};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractUsers: Sync + Send {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User>;

    /// Fetch a user by their lowercase email
    async fn fetch_user_by_email(&self, email: &str) -> Result<User>;

    /// Fetch multiple users by their ids
    async fn fetch_users<'a>(&self, ids: &'a [String]) -> Result<Vec<User>>;

    /// Fetch all users
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Update a user with new information
    async fn update_user(
        &self,
        id: &str,
        partial: &PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()>;

    /// Delete a user by their id
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Append a warning to a user's record
    async fn add_user_warning(&self, id: &str, warning: &Warning) -> Result<()>;

    /// Count users whose home area is the given code
    async fn count_users_in_area(&self, code: &str) -> Result<u64>;
}
