use beacon_result::Result;

use crate::{AreaCode, PartialAreaCode};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractAreaCodes: Sync + Send {
    /// Insert a new area code into the database
    ///
    /// Fails with `AreaCodeTaken` when the code is already in use.
    async fn insert_area_code(&self, area: &AreaCode) -> Result<()>;

    /// Fetch an area by its id
    async fn fetch_area_code(&self, id: &str) -> Result<AreaCode>;

    /// Fetch an area by its code
    async fn fetch_area_code_by_code(&self, code: &str) -> Result<AreaCode>;

    /// Fetch all areas
    async fn list_area_codes(&self) -> Result<Vec<AreaCode>>;

    /// Update an area with new information
    async fn update_area_code(&self, id: &str, partial: &PartialAreaCode) -> Result<()>;

    /// Delete an area by its id
    async fn delete_area_code(&self, id: &str) -> Result<()>;

    /// Add admins to an area and the area to each admin's list
    async fn assign_area_admins(&self, area_id: &str, admin_ids: &[String]) -> Result<()>;

    /// Remove an admin from an area and the area from their list
    async fn remove_area_admin(&self, area_id: &str, user_id: &str) -> Result<()>;
}
