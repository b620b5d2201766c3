use beacon_result::Result;

use crate::MongoDb;
use crate::{AreaCode, PartialAreaCode};

use super::AbstractAreaCodes;

static COL: &str = "area_codes";

#[async_trait]
impl AbstractAreaCodes for MongoDb {
    /// Insert a new area code into the database
    async fn insert_area_code(&self, area: &AreaCode) -> Result<()> {
        self.insert_one(COL, area).await.map(|_| ()).map_err(|err| {
            if crate::is_duplicate_key(&err) {
                create_error!(AreaCodeTaken)
            } else {
                create_database_error!("insert_one", COL)
            }
        })
    }

    /// Fetch an area by its id
    async fn fetch_area_code(&self, id: &str) -> Result<AreaCode> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(UnknownAreaCode))
    }

    /// Fetch an area by its code
    async fn fetch_area_code_by_code(&self, code: &str) -> Result<AreaCode> {
        query!(
            self,
            find_one,
            COL,
            doc! {
                "code": code
            }
        )?
        .ok_or_else(|| create_error!(UnknownAreaCode))
    }

    /// Fetch all areas
    async fn list_area_codes(&self) -> Result<Vec<AreaCode>> {
        query!(self, find, COL, doc! {})
    }

    /// Update an area with new information
    async fn update_area_code(&self, id: &str, partial: &PartialAreaCode) -> Result<()> {
        query!(self, update_one_by_id, COL, id, partial, vec![], None).map(|_| ())
    }

    /// Delete an area by its id
    async fn delete_area_code(&self, id: &str) -> Result<()> {
        query!(self, delete_one_by_id, COL, id).map(|_| ())
    }

    /// Add admins to an area and the area to each admin's list
    async fn assign_area_admins(&self, area_id: &str, admin_ids: &[String]) -> Result<()> {
        let code = self.fetch_area_code(area_id).await.map(|area| area.code)?;

        self.col::<AreaCode>(COL)
            .update_one(
                doc! {
                    "_id": area_id
                },
                doc! {
                    "$addToSet": {
                        "admins": {
                            "$each": admin_ids
                        }
                    }
                },
            )
            .await
            .map_err(|_| create_database_error!("update_one", COL))?;

        self.col::<crate::User>("users")
            .update_many(
                doc! {
                    "_id": {
                        "$in": admin_ids
                    }
                },
                doc! {
                    "$addToSet": {
                        "assigned_areas": code
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_many", "users"))
    }

    /// Remove an admin from an area and the area from their list
    async fn remove_area_admin(&self, area_id: &str, user_id: &str) -> Result<()> {
        let area = self.fetch_area_code(area_id).await?;

        self.col::<AreaCode>(COL)
            .update_one(
                doc! {
                    "_id": area_id
                },
                doc! {
                    "$pull": {
                        "admins": user_id
                    }
                },
            )
            .await
            .map_err(|_| create_database_error!("update_one", COL))?;

        self.col::<crate::User>("users")
            .update_one(
                doc! {
                    "_id": user_id
                },
                doc! {
                    "$pull": {
                        "assigned_areas": area.code
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", "users"))
    }
}
