use beacon_result::Result;

use crate::ReferenceDb;
use crate::{FieldsUser, PartialUser, User, Warning};

use super::AbstractUsers;

#[async_trait]
impl AbstractUsers for ReferenceDb {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.lock().await;
        if users.contains_key(&user.id) {
            return Err(create_database_error!("insert", "user"));
        }

        if users.values().any(|entry| entry.email == user.email) {
            return Err(create_error!(EmailTaken));
        }

        users.insert(user.id.to_string(), user.clone());
        Ok(())
    }

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User> {
        let users = self.users.lock().await;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownUser))
    }

    /// Fetch a user by their lowercase email
    async fn fetch_user_by_email(&self, email: &str) -> Result<User> {
        let users = self.users.lock().await;
        users
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| create_error!(UnknownUser))
    }

    /// Fetch multiple users by their ids
    async fn fetch_users<'a>(&self, ids: &'a [String]) -> Result<Vec<User>> {
        let users = self.users.lock().await;
        ids.iter()
            .map(|id| {
                users
                    .get(id)
                    .cloned()
                    .ok_or_else(|| create_error!(UnknownUser))
            })
            .collect()
    }

    /// Fetch all users
    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.lock().await;
        Ok(users.values().cloned().collect())
    }

    /// Update a user with new information
    async fn update_user(
        &self,
        id: &str,
        partial: &PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(id) {
            for field in remove {
                #[allow(clippy::disallowed_methods)]
                user.remove_field(&field);
            }

            user.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownUser))
        }
    }

    /// Delete a user by their id
    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users.lock().await;
        if users.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(UnknownUser))
        }
    }

    /// Append a warning to a user's record
    async fn add_user_warning(&self, id: &str, warning: &Warning) -> Result<()> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(id) {
            user.warnings.push(warning.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownUser))
        }
    }

    /// Count users whose home area is the given code
    async fn count_users_in_area(&self, code: &str) -> Result<u64> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .filter(|user| user.area_code.as_deref() == Some(code))
            .count() as u64)
    }
}
