use beacon_result::Result;

use crate::ReferenceDb;
use crate::{AreaCode, PartialAreaCode};

use super::AbstractAreaCodes;

#[async_trait]
impl AbstractAreaCodes for ReferenceDb {
    /// Insert a new area code into the database
    async fn insert_area_code(&self, area: &AreaCode) -> Result<()> {
        let mut area_codes = self.area_codes.lock().await;
        if area_codes.contains_key(&area.id) {
            return Err(create_database_error!("insert", "area_code"));
        }

        if area_codes.values().any(|entry| entry.code == area.code) {
            return Err(create_error!(AreaCodeTaken));
        }

        area_codes.insert(area.id.to_string(), area.clone());
        Ok(())
    }

    /// Fetch an area by its id
    async fn fetch_area_code(&self, id: &str) -> Result<AreaCode> {
        let area_codes = self.area_codes.lock().await;
        area_codes
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownAreaCode))
    }

    /// Fetch an area by its code
    async fn fetch_area_code_by_code(&self, code: &str) -> Result<AreaCode> {
        let area_codes = self.area_codes.lock().await;
        area_codes
            .values()
            .find(|area| area.code == code)
            .cloned()
            .ok_or_else(|| create_error!(UnknownAreaCode))
    }

    /// Fetch all areas
    async fn list_area_codes(&self) -> Result<Vec<AreaCode>> {
        let area_codes = self.area_codes.lock().await;
        Ok(area_codes.values().cloned().collect())
    }

    /// Update an area with new information
    async fn update_area_code(&self, id: &str, partial: &PartialAreaCode) -> Result<()> {
        let mut area_codes = self.area_codes.lock().await;
        if let Some(area) = area_codes.get_mut(id) {
            area.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownAreaCode))
        }
    }

    /// Delete an area by its id
    async fn delete_area_code(&self, id: &str) -> Result<()> {
        let mut area_codes = self.area_codes.lock().await;
        if area_codes.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(UnknownAreaCode))
        }
    }

    /// Add admins to an area and the area to each admin's list
    async fn assign_area_admins(&self, area_id: &str, admin_ids: &[String]) -> Result<()> {
        let mut area_codes = self.area_codes.lock().await;
        let code = {
            let area = area_codes
                .get_mut(area_id)
                .ok_or_else(|| create_error!(UnknownAreaCode))?;

            for id in admin_ids {
                if !area.admins.contains(id) {
                    area.admins.push(id.to_string());
                }
            }

            area.code.clone()
        };

        let mut users = self.users.lock().await;
        for id in admin_ids {
            let user = users.get_mut(id).ok_or_else(|| create_error!(UnknownUser))?;
            if !user.assigned_areas.contains(&code) {
                user.assigned_areas.push(code.clone());
            }
        }

        Ok(())
    }

    /// Remove an admin from an area and the area from their list
    async fn remove_area_admin(&self, area_id: &str, user_id: &str) -> Result<()> {
        let mut area_codes = self.area_codes.lock().await;
        let code = {
            let area = area_codes
                .get_mut(area_id)
                .ok_or_else(|| create_error!(UnknownAreaCode))?;

            area.admins.retain(|id| id != user_id);
            area.code.clone()
        };

        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(user_id) {
            user.assigned_areas.retain(|area| area != &code);
        }

        Ok(())
    }
}
