use mongodb::options::FindOptions;

use beacon_result::Result;

use crate::MongoDb;
use crate::{FieldsIncident, Incident, IntoDocumentPath, PartialIncident};

use super::AbstractIncidents;

static COL: &str = "incidents";

#[async_trait]
impl AbstractIncidents for MongoDb {
    /// Insert a new incident into the database
    async fn insert_incident(&self, incident: &Incident) -> Result<()> {
        query!(self, insert_one, COL, incident).map(|_| ())
    }

    /// Fetch an incident by its id
    async fn fetch_incident(&self, id: &str) -> Result<Incident> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(UnknownIncident))
    }

    /// Update an incident with new information
    async fn update_incident(
        &self,
        id: &str,
        partial: &PartialIncident,
        remove: Vec<FieldsIncident>,
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

    /// Delete an incident by its id
    async fn delete_incident(&self, id: &str) -> Result<()> {
        query!(self, delete_one_by_id, COL, id).map(|_| ())
    }

    /// Fetch all incidents filed in an area, newest first
    async fn list_incidents_in_area(&self, code: &str) -> Result<Vec<Incident>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {
                "area_code": code
            },
            FindOptions::builder()
                .sort(doc! {
                    "_id": -1_i32
                })
                .build()
        )
    }

    /// Fetch all incidents filed by a user, newest first
    async fn list_incidents_by_author(&self, author_id: &str) -> Result<Vec<Incident>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {
                "author_id": author_id
            },
            FindOptions::builder()
                .sort(doc! {
                    "_id": -1_i32
                })
                .build()
        )
    }

    /// Fetch the most recently approved incidents across all areas
    async fn list_latest_approved(&self, limit: i64) -> Result<Vec<Incident>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {
                "status": "approved"
            },
            FindOptions::builder()
                .sort(doc! {
                    "_id": -1_i32
                })
                .limit(limit)
                .build()
        )
    }

    /// Count incidents filed in an area
    async fn count_incidents_in_area(&self, code: &str) -> Result<u64> {
        query!(
            self,
            count_documents,
            COL,
            doc! {
                "area_code": code
            }
        )
    }

    /// Record a member's acknowledgement of an incident
    async fn add_acknowledgement(&self, id: &str, user_id: &str) -> Result<()> {
        self.col::<Incident>(COL)
            .update_one(
                doc! {
                    "_id": id
                },
                doc! {
                    "$addToSet": {
                        "acknowledged_by": user_id
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", COL))
    }
}

impl IntoDocumentPath for FieldsIncident {
    fn as_path(&self) -> Option<&'static str> {
        Some(match self {
            FieldsIncident::ImageUrl => "image_url",
        })
    }
}
