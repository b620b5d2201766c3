use mongodb::options::FindOptions;

use beacon_result::Result;

use crate::AuditLogEntry;
use crate::MongoDb;

use super::AbstractAuditLogs;

static COL: &str = "audit_logs";

#[async_trait]
impl AbstractAuditLogs for MongoDb {
    /// Insert a new audit entry into the database
    async fn insert_audit_log(&self, entry: &AuditLogEntry) -> Result<()> {
        query!(self, insert_one, COL, entry).map(|_| ())
    }

    /// Fetch all audit entries, newest first
    async fn list_audit_logs(&self) -> Result<Vec<AuditLogEntry>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {},
            FindOptions::builder()
                .sort(doc! {
                    "_id": -1_i32
                })
                .build()
        )
    }
}
