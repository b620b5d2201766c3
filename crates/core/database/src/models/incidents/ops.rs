use beacon_result::Result;

use crate::{FieldsIncident, Incident, PartialIncident};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractIncidents: Sync + Send {
    /// Insert a new incident into the database
    async fn insert_incident(&self, incident: &Incident) -> Result<()>;

    /// Fetch an incident by its id
    async fn fetch_incident(&self, id: &str) -> Result<Incident>;

    /// Update an incident with new information
    async fn update_incident(
        &self,
        id: &str,
        partial: &PartialIncident,
        remove: Vec<FieldsIncident>,
    ) -> Result<()>;

    /// Delete an incident by its id
    async fn delete_incident(&self, id: &str) -> Result<()>;

    /// Fetch all incidents filed in an area, newest first
    async fn list_incidents_in_area(&self, code: &str) -> Result<Vec<Incident>>;

    /// Fetch all incidents filed by a user, newest first
    async fn list_incidents_by_author(&self, author_id: &str) -> Result<Vec<Incident>>;

    /// Fetch the most recently approved incidents across all areas
    async fn list_latest_approved(&self, limit: i64) -> Result<Vec<Incident>>;

    /// Count incidents filed in an area
    async fn count_incidents_in_area(&self, code: &str) -> Result<u64>;

    /// Record a member's acknowledgement of an incident
    async fn add_acknowledgement(&self, id: &str, user_id: &str) -> Result<()>;
}
