use beacon_result::Result;

use crate::MongoDb;
use crate::{FieldsUser, IntoDocumentPath, PartialUser, User, Warning};

use super::AbstractUsers;

static COL: &str = "users";

#[async_trait]
impl AbstractUsers for MongoDb {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.insert_one(COL, user).await.map(|_| ()).map_err(|err| {
            if crate::is_duplicate_key(&err) {
                create_error!(EmailTaken)
            } else {
                create_database_error!("insert_one", COL)
            }
        })
    }

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(UnknownUser))
    }

    /// Fetch a user by their lowercase email
    async fn fetch_user_by_email(&self, email: &str) -> Result<User> {
        query!(
            self,
            find_one,
            COL,
            doc! {
                "email": email
            }
        )?
        .ok_or_else(|| create_error!(UnknownUser))
    }

    /// Fetch multiple users by their ids
    async fn fetch_users<'a>(&self, ids: &'a [String]) -> Result<Vec<User>> {
        query!(
            self,
            find,
            COL,
            doc! {
                "_id": {
                    "$in": ids
                }
            }
        )
    }

    /// Fetch all users
    async fn list_users(&self) -> Result<Vec<User>> {
        query!(self, find, COL, doc! {})
    }

    /// Update a user with new information
    async fn update_user(
        &self,
        id: &str,
        partial: &PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()> {
        query!(
            self,
            update_one_by_id,
            COL,
            id,
            partial,
            remove.iter().map(|x| x as &dyn IntoDocumentPath).collect(),
            None
        )
        .map(|_| ())
    }

    /// Delete a user by their id
    async fn delete_user(&self, id: &str) -> Result<()> {
        query!(self, delete_one_by_id, COL, id).map(|_| ())
    }

    /// Append a warning to a user's record
    async fn add_user_warning(&self, id: &str, warning: &Warning) -> Result<()> {
        self.col::<User>(COL)
            .update_one(
                doc! {
                    "_id": id
                },
                doc! {
                    "$push": {
                        "warnings": bson::to_document(warning)
                            .map_err(|_| create_database_error!("to_document", COL))?
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", COL))
    }

    /// Count users whose home area is the given code
    async fn count_users_in_area(&self, code: &str) -> Result<u64> {
        query!(
            self,
            count_documents,
            COL,
            doc! {
                "area_code": code
            }
        )
    }
}

impl IntoDocumentPath for FieldsUser {
    fn as_path(&self) -> Option<&'static str> {
        Some(match self {
            FieldsUser::AreaCode => "area_code",
            FieldsUser::SuspendedUntil => "suspended_until",
        })
    }
}
