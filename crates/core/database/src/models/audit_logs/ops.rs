use beacon_result::Result;

use crate::AuditLogEntry;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractAuditLogs: Sync + Send {
    /// Insert a new audit entry into the database
    async fn insert_audit_log(&self, entry: &AuditLogEntry) -> Result<()>;

    /// Fetch all audit entries, newest first
    async fn list_audit_logs(&self) -> Result<Vec<AuditLogEntry>>;
}
