use beacon_result::Result;

use crate::ReferenceDb;
use crate::{FieldsIncident, Incident, IncidentStatus, PartialIncident};

use super::AbstractIncidents;

#[async_trait]
impl AbstractIncidents for ReferenceDb {
    /// Insert a new incident into the database
    async fn insert_incident(&self, incident: &Incident) -> Result<()> {
        let mut incidents = self.incidents.lock().await;
        if incidents.contains_key(&incident.id) {
            Err(create_database_error!("insert", "incident"))
        } else {
            incidents.insert(incident.id.to_string(), incident.clone());
            Ok(())
        }
    }

    /// Fetch an incident by its id
    async fn fetch_incident(&self, id: &str) -> Result<Incident> {
        let incidents = self.incidents.lock().await;
        incidents
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownIncident))
    }

    /// Update an incident with new information
    async fn update_incident(
        &self,
        id: &str,
        partial: &PartialIncident,
        remove: Vec<FieldsIncident>,
    ) -> Result<()> {
        let mut incidents = self.incidents.lock().await;
        if let Some(incident) = incidents.get_mut(id) {
            for field in remove {
                #[allow(clippy::disallowed_methods)]
                incident.remove_field(&field);
            }

            incident.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownIncident))
        }
    }

    /// Delete an incident by its id
    async fn delete_incident(&self, id: &str) -> Result<()> {
        let mut incidents = self.incidents.lock().await;
        if incidents.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(UnknownIncident))
        }
    }

    /// Fetch all incidents filed in an area, newest first
    async fn list_incidents_in_area(&self, code: &str) -> Result<Vec<Incident>> {
        let incidents = self.incidents.lock().await;
        let mut result: Vec<Incident> = incidents
            .values()
            .filter(|incident| incident.area_code == code)
            .cloned()
            .collect();

        result.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(result)
    }

    /// Fetch all incidents filed by a user, newest first
    async fn list_incidents_by_author(&self, author_id: &str) -> Result<Vec<Incident>> {
        let incidents = self.incidents.lock().await;
        let mut result: Vec<Incident> = incidents
            .values()
            .filter(|incident| incident.author_id == author_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(result)
    }

    /// Fetch the most recently approved incidents across all areas
    async fn list_latest_approved(&self, limit: i64) -> Result<Vec<Incident>> {
        let incidents = self.incidents.lock().await;
        let mut result: Vec<Incident> = incidents
            .values()
            .filter(|incident| incident.status == IncidentStatus::Approved)
            .cloned()
            .collect();

        result.sort_by(|a, b| b.id.cmp(&a.id));
        result.truncate(limit as usize);
        Ok(result)
    }

    /// Count incidents filed in an area
    async fn count_incidents_in_area(&self, code: &str) -> Result<u64> {
        let incidents = self.incidents.lock().await;
        Ok(incidents
            .values()
            .filter(|incident| incident.area_code == code)
            .count() as u64)
    }

    /// Record a member's acknowledgement of an incident
    async fn add_acknowledgement(&self, id: &str, user_id: &str) -> Result<()> {
        let mut incidents = self.incidents.lock().await;
        if let Some(incident) = incidents.get_mut(id) {
            if !incident.acknowledged_by.iter().any(|entry| entry == user_id) {
                incident.acknowledged_by.push(user_id.to_string());
            }

            Ok(())
        } else {
            Err(create_error!(UnknownIncident))
        }
    }
}
