mod area_codes;
mod audit_logs;
mod incidents;
mod messages;
mod notifications;
mod reports;
mod sessions;
mod users;

pub use area_codes::*;
pub use audit_logs::*;
pub use incidents::*;
pub use messages::*;
pub use notifications::*;
pub use reports::*;
pub use sessions::*;
pub use users::*;

use crate::{Database, ReferenceDb};

#[cfg(feature = "mongodb")]
use crate::MongoDb;

pub trait AbstractDatabase:
    Sync
    + Send
    + area_codes::AbstractAreaCodes
    + audit_logs::AbstractAuditLogs
    + incidents::AbstractIncidents
    + messages::AbstractMessages
    + notifications::AbstractNotifications
    + reports::AbstractReports
    + sessions::AbstractSessions
    + users::AbstractUsers
{
}

impl AbstractDatabase for ReferenceDb {}

#[cfg(feature = "mongodb")]
impl AbstractDatabase for MongoDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            #[cfg(feature = "mongodb")]
            Database::MongoDb(mongo) => mongo,
        }
    }
}
