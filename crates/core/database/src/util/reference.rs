use beacon_result::Result;
#[cfg(feature = "rocket-impl")]
use rocket::request::FromParam;
#[cfg(feature = "rocket-impl")]
use schemars::{
    schema::{InstanceType, Schema, SchemaObject, SingleOrVec},
    JsonSchema,
};

use crate::{AreaCode, Database, Incident, IncidentMessage, Notification, Report, User};

/// Reference to some object in the database
pub struct Reference<'a> {
    /// Id of object
    pub id: &'a str,
}

impl<'a> Reference<'a> {
    /// Create a Ref from an unchecked string
    pub fn from_unchecked(id: &'a str) -> Reference<'a> {
        Reference { id }
    }

    /// Fetch user from Ref
    pub async fn as_user(&self, db: &Database) -> Result<User> {
        db.fetch_user(self.id).await
    }

    /// Fetch incident from Ref
    pub async fn as_incident(&self, db: &Database) -> Result<Incident> {
        db.fetch_incident(self.id).await
    }

    /// Fetch area by its registry id from Ref
    pub async fn as_area_code(&self, db: &Database) -> Result<AreaCode> {
        db.fetch_area_code(self.id).await
    }

    /// Fetch message from Ref
    pub async fn as_message(&self, db: &Database) -> Result<IncidentMessage> {
        db.fetch_message(self.id).await
    }

    /// Fetch report from Ref
    pub async fn as_report(&self, db: &Database) -> Result<Report> {
        db.fetch_report(self.id).await
    }

    /// Fetch notification from Ref
    pub async fn as_notification(&self, db: &Database) -> Result<Notification> {
        db.fetch_notification(self.id).await
    }
}

#[cfg(feature = "rocket-impl")]
impl<'r> FromParam<'r> for Reference<'r> {
    type Error = &'r str;

    fn from_param(param: &'r str) -> Result<Self, Self::Error> {
        Ok(Reference::from_unchecked(param))
    }
}

#[cfg(feature = "rocket-impl")]
impl<'a> JsonSchema for Reference<'a> {
    fn schema_name() -> String {
        "Id".to_string()
    }

    fn json_schema(_gen: &mut schemars::gen::SchemaGenerator) -> Schema {
        Schema::Object(SchemaObject {
            instance_type: Some(SingleOrVec::Single(Box::new(InstanceType::String))),
            ..Default::default()
        })
    }
}
