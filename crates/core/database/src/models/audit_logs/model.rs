use iso8601_timestamp::Timestamp;
use ulid::Ulid;

use crate::{Database, User};

auto_derived!(
    /// # Audit Log Entry
    ///
    /// Record of a privileged action, kept for accountability
    pub struct AuditLogEntry {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the user who performed the action
        pub actor_id: String,
        /// Actor's display name at the time of the action
        pub actor_name: String,
        /// Machine-readable action name, e.g. `incident_moderate`
        pub action: String,
        /// What kind of record was touched
        pub target_type: AuditTargetType,
        /// Id of the touched record
        pub target_id: String,
        /// JSON blob describing the change
        pub details: String,
        /// When the action happened
        pub created_at: Timestamp,
    }

    /// Kind of record an audit entry points at
    #[derive(Copy, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum AuditTargetType {
        Incident,
        User,
        Report,
        System,
    }
);

impl AuditLogEntry {
    /// Record a privileged action
    ///
    /// Auditing is best-effort, a failed write is logged and swallowed
    /// so it can never fail the action being recorded.
    pub async fn log(
        db: &Database,
        actor: &User,
        action: &str,
        target_type: AuditTargetType,
        target_id: String,
        details: String,
    ) {
        let entry = AuditLogEntry {
            id: Ulid::new().to_string(),
            actor_id: actor.id.to_string(),
            actor_name: actor.display_name.to_string(),
            action: action.to_string(),
            target_type,
            target_id,
            details,
            created_at: Timestamp::now_utc(),
        };

        if let Err(error) = db.insert_audit_log(&entry).await {
            warn!("Failed to record audit entry: {error:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{AuditLogEntry, AuditTargetType, User};

    #[async_std::test]
    async fn entries_are_listed_newest_first() {
        database_test!(|db| async move {
            let actor = User::create(
                &db,
                "moderator@example.com".to_string(),
                "hash".to_string(),
                "Moderator".to_string(),
                None,
            )
            .await
            .unwrap();

            AuditLogEntry::log(
                &db,
                &actor,
                "user_suspend",
                AuditTargetType::User,
                "01ABC".to_string(),
                "{}".to_string(),
            )
            .await;

            AuditLogEntry::log(
                &db,
                &actor,
                "incident_moderate",
                AuditTargetType::Incident,
                "01DEF".to_string(),
                "{}".to_string(),
            )
            .await;

            let entries = db.list_audit_logs().await.unwrap();
            assert_eq!(entries.len(), 2);
            assert!(entries
                .iter()
                .any(|entry| entry.action == "incident_moderate"));
            assert_eq!(entries[0].actor_name, "Moderator");
        });
    }
}
