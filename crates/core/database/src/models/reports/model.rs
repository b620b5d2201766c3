use beacon_result::Result;
use iso8601_timestamp::{Duration, Timestamp};
use ulid::Ulid;

use crate::{
    AuditLogEntry, AuditTargetType, Database, Incident, IncidentMessage, Notification,
    NotificationKind, PartialUser, User, Warning,
};

auto_derived_partial!(
    /// # Abuse Report
    ///
    /// Complaint about another user's conduct in a message thread.
    /// The thread is copied into the report at filing time so the
    /// evidence survives thread deletion.
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the incident the conversation belongs to
        pub incident_id: String,
        /// Id of the user filing the complaint
        pub reporter_id: String,
        /// Id of the user being reported
        pub reported_user_id: String,
        /// Why the reporter filed this complaint
        pub reason: String,
        /// Frozen copy of the thread at filing time, oldest first
        pub snapshot: Vec<IncidentMessage>,
        /// Where this report is in the review pipeline
        pub status: ReportStatus,
        /// What the reviewing moderator decided
        pub action_taken: ReportAction,
        /// Id of the moderator who concluded the review
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reviewed_by: Option<String>,
        /// When the review concluded
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reviewed_at: Option<Timestamp>,
        /// When this report was filed
        pub created_at: Timestamp,
    },
    "PartialReport"
);

auto_derived!(
    /// Review pipeline state of a report
    #[derive(Copy, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum ReportStatus {
        /// Waiting for a moderator
        Pending,
        /// A moderator has looked at it but not concluded
        Reviewed,
        /// Review concluded
        Resolved,
    }

    /// Outcome of a concluded review
    #[derive(Copy, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum ReportAction {
        /// Dismissed without consequence
        None,
        /// A warning was appended to the offender's record
        Warned,
        /// The offender's account was suspended
        Suspended,
    }
);

impl Report {
    /// File a complaint about the other participant of a thread
    pub async fn file(
        db: &Database,
        reporter: &User,
        incident: &Incident,
        reported_user_id: String,
        reason: String,
    ) -> Result<Report> {
        if reported_user_id == reporter.id {
            return Err(create_error!(CannotReportYourself));
        }

        if reason.trim().is_empty() {
            return Err(create_error!(FailedValidation {
                error: "reason must not be empty".to_string()
            }));
        }

        // Reported user must exist
        db.fetch_user(&reported_user_id).await?;

        // Freeze the conversation as evidence
        let snapshot = db
            .fetch_thread(&incident.id, &reporter.id, &reported_user_id)
            .await?;

        let report = Report {
            id: Ulid::new().to_string(),
            incident_id: incident.id.to_string(),
            reporter_id: reporter.id.to_string(),
            reported_user_id,
            reason,
            snapshot,
            status: ReportStatus::Pending,
            action_taken: ReportAction::None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Timestamp::now_utc(),
        };

        db.insert_report(&report).await?;
        Ok(report)
    }

    /// Conclude the review of a report
    ///
    /// `suspend_days` only applies to [`ReportAction::Suspended`];
    /// when absent the suspension is indefinite.
    pub async fn review(
        &mut self,
        db: &Database,
        moderator: &User,
        action: ReportAction,
        note: Option<String>,
        suspend_days: Option<i64>,
    ) -> Result<()> {
        if self.status == ReportStatus::Resolved {
            return Err(create_error!(InvalidOperation));
        }

        let reason = note.unwrap_or_else(|| self.reason.to_string());

        match action {
            ReportAction::None => {}
            ReportAction::Warned => {
                db.add_user_warning(
                    &self.reported_user_id,
                    &Warning {
                        reason: reason.to_string(),
                        moderator_id: moderator.id.to_string(),
                        created_at: Timestamp::now_utc(),
                    },
                )
                .await?;

                Notification::emit(
                    db,
                    Some(self.reported_user_id.clone()),
                    "You have received a warning".to_string(),
                    format!("A moderator reviewed a complaint about you: {reason}"),
                    NotificationKind::Moderation,
                    None,
                )
                .await;
            }
            ReportAction::Suspended => {
                db.update_user(
                    &self.reported_user_id,
                    &PartialUser {
                        suspended: Some(true),
                        suspended_until: suspend_days
                            .map(|days| Timestamp::now_utc() + Duration::days(days)),
                        ..Default::default()
                    },
                    vec![],
                )
                .await?;

                Notification::emit(
                    db,
                    Some(self.reported_user_id.clone()),
                    "Your account has been suspended".to_string(),
                    format!("A moderator reviewed a complaint about you: {reason}"),
                    NotificationKind::Moderation,
                    None,
                )
                .await;
            }
        }

        let partial = PartialReport {
            status: Some(ReportStatus::Resolved),
            action_taken: Some(action),
            reviewed_by: Some(moderator.id.to_string()),
            reviewed_at: Some(Timestamp::now_utc()),
            ..Default::default()
        };

        self.apply_options(partial.clone());
        db.update_report(&self.id, &partial).await?;

        AuditLogEntry::log(
            db,
            moderator,
            "report_review",
            AuditTargetType::Report,
            self.id.clone(),
            serde_json::json!({
                "action": action,
                "reported_user_id": self.reported_user_id,
            })
            .to_string(),
        )
        .await;

        Ok(())
    }

    /// Permanently delete a report
    pub async fn delete(self, db: &Database, actor: &User) -> Result<()> {
        db.delete_report(&self.id).await?;

        AuditLogEntry::log(
            db,
            actor,
            "report_delete",
            AuditTargetType::Report,
            self.id,
            "{}".to_string(),
        )
        .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use beacon_result::ErrorType;

    use crate::{
        Incident, IncidentCategory, IncidentMessage, Report, ReportAction, ReportStatus, User,
    };

    async fn seed(db: &crate::Database) -> (User, User, Incident) {
        let owner = User::create(
            db,
            "owner@example.com".to_string(),
            "hash".to_string(),
            "Owner".to_string(),
            Some("AREA01".to_string()),
        )
        .await
        .unwrap();

        let offender = User::create(
            db,
            "offender@example.com".to_string(),
            "hash".to_string(),
            "Offender".to_string(),
            Some("AREA01".to_string()),
        )
        .await
        .unwrap();

        let incident = Incident::create(
            db,
            &owner,
            "Garage broken into".to_string(),
            "Door forced open overnight, tools missing.".to_string(),
            IncidentCategory::Theft,
            "Elm street".to_string(),
            None,
            None,
            "AREA01".to_string(),
            None,
            true,
        )
        .await
        .unwrap();

        (owner, offender, incident)
    }

    #[async_std::test]
    async fn snapshot_survives_thread_deletion() {
        database_test!(|db| async move {
            let (owner, offender, incident) = seed(&db).await;

            IncidentMessage::send(&db, &incident, &offender, None, "Rude message".to_string())
                .await
                .unwrap();
            IncidentMessage::send(&db, &incident, &owner, None, "Please stop".to_string())
                .await
                .unwrap();

            let report = Report::file(
                &db,
                &owner,
                &incident,
                offender.id.to_string(),
                "Harassment in private messages".to_string(),
            )
            .await
            .unwrap();
            assert_eq!(report.snapshot.len(), 2);

            db.delete_thread(&incident.id, &owner.id, &offender.id)
                .await
                .unwrap();

            // Evidence is untouched by the deletion
            let report = db.fetch_report(&report.id).await.unwrap();
            assert_eq!(report.snapshot.len(), 2);
            assert_eq!(report.snapshot[0].content, "Rude message");
        });
    }

    #[async_std::test]
    async fn cannot_report_yourself() {
        database_test!(|db| async move {
            let (owner, _, incident) = seed(&db).await;

            let error = Report::file(
                &db,
                &owner,
                &incident,
                owner.id.to_string(),
                "Testing".to_string(),
            )
            .await
            .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::CannotReportYourself));
        });
    }

    #[async_std::test]
    async fn review_with_warning() {
        database_test!(|db| async move {
            let (owner, offender, incident) = seed(&db).await;
            let moderator = User::create(
                &db,
                "moderator@example.com".to_string(),
                "hash".to_string(),
                "Moderator".to_string(),
                None,
            )
            .await
            .unwrap();

            let mut report = Report::file(
                &db,
                &owner,
                &incident,
                offender.id.to_string(),
                "Harassment".to_string(),
            )
            .await
            .unwrap();

            report
                .review(
                    &db,
                    &moderator,
                    ReportAction::Warned,
                    Some("Abusive language".to_string()),
                    None,
                )
                .await
                .unwrap();

            assert_eq!(report.status, ReportStatus::Resolved);

            let offender = db.fetch_user(&offender.id).await.unwrap();
            assert_eq!(offender.warnings.len(), 1);
            assert_eq!(offender.warnings[0].reason, "Abusive language");

            // Re-reviewing a concluded report is refused
            let error = report
                .review(&db, &moderator, ReportAction::None, None, None)
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::InvalidOperation));
        });
    }

    #[async_std::test]
    async fn review_with_suspension() {
        database_test!(|db| async move {
            let (owner, offender, incident) = seed(&db).await;
            let moderator = User::create(
                &db,
                "moderator@example.com".to_string(),
                "hash".to_string(),
                "Moderator".to_string(),
                None,
            )
            .await
            .unwrap();

            let mut report = Report::file(
                &db,
                &owner,
                &incident,
                offender.id.to_string(),
                "Threats".to_string(),
            )
            .await
            .unwrap();

            report
                .review(&db, &moderator, ReportAction::Suspended, None, Some(7))
                .await
                .unwrap();

            let offender = db.fetch_user(&offender.id).await.unwrap();
            assert!(offender.is_suspended());
            assert!(offender.suspended_until.is_some());
        });
    }
}
