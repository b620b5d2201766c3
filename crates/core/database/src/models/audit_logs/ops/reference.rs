use beacon_result::Result;

use crate::AuditLogEntry;
use crate::ReferenceDb;

use super::AbstractAuditLogs;

#[async_trait]
impl AbstractAuditLogs for ReferenceDb {
    /// Insert a new audit entry into the database
    async fn insert_audit_log(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut audit_logs = self.audit_logs.lock().await;
        if audit_logs.contains_key(&entry.id) {
            Err(create_database_error!("insert", "audit_log"))
        } else {
            audit_logs.insert(entry.id.to_string(), entry.clone());
            Ok(())
        }
    }

    /// Fetch all audit entries, newest first
    async fn list_audit_logs(&self) -> Result<Vec<AuditLogEntry>> {
        let audit_logs = self.audit_logs.lock().await;
        let mut result: Vec<AuditLogEntry> = audit_logs.values().cloned().collect();
        result.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(result)
    }
}
