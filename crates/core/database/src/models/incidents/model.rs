use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::{
    AuditLogEntry, AuditTargetType, Database, Notification, NotificationKind, PartialUser, User,
};

/// Points awarded to the reporter when their report is first approved
const APPROVAL_REWARD_POINTS: i64 = 10;

/// Minimum length below which text is considered spam
const SPAM_MIN_LENGTH: usize = 3;

/// Vowel ratio below which longer text is considered gibberish
const SPAM_VOWEL_RATIO: f64 = 0.10;

/// The vowel rule only applies to text longer than this
const SPAM_VOWEL_MIN_LENGTH: usize = 5;

/// Length of a run of identical characters considered spam
const SPAM_RUN_LENGTH: usize = 5;

auto_derived_partial!(
    /// # Incident
    pub struct Incident {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the reporting user
        pub author_id: String,
        /// Short summary of the incident
        pub title: String,
        /// Full description
        pub description: String,
        /// Category of incident
        pub category: IncidentCategory,

        /// Free-text location
        pub location: String,
        /// Latitude, if the reporter shared coordinates
        #[serde(skip_serializing_if = "Option::is_none")]
        pub latitude: Option<f64>,
        /// Longitude, if the reporter shared coordinates
        #[serde(skip_serializing_if = "Option::is_none")]
        pub longitude: Option<f64>,

        /// Moderation status
        pub status: IncidentStatus,
        /// Area code this incident is scoped to
        pub area_code: String,
        /// Whether an admin marked this incident important
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub important: bool,
        /// URL of an uploaded image, stored opaquely
        #[serde(skip_serializing_if = "Option::is_none")]
        pub image_url: Option<String>,
        /// Whether private messages may be sent about this incident
        pub allow_messages: bool,
        /// Ids of members who acknowledged this incident
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub acknowledged_by: Vec<String>,

        /// When this incident was filed
        pub created_at: Timestamp,
        /// When this incident was last updated
        pub updated_at: Timestamp,
    },
    "PartialIncident"
);

auto_derived!(
    /// Closed set of incident categories
    #[serde(rename_all = "snake_case")]
    #[derive(Copy, Eq)]
    pub enum IncidentCategory {
        Theft,
        Vandalism,
        Accident,
        Hazard,
        Suspicious,
        Noise,
        Other,
    }

    /// Moderation status of an incident
    #[serde(rename_all = "snake_case")]
    #[derive(Copy, Eq)]
    pub enum IncidentStatus {
        Pending,
        Approved,
        UnderProcess,
        Rejected,
        ProblemSolved,
    }

    /// Optional fields on incident object
    pub enum FieldsIncident {
        ImageUrl,
    }

    /// Incident as exposed on public endpoints, stripped of
    /// anything identifying the reporter
    pub struct PublicIncident {
        #[serde(rename = "_id")]
        pub id: String,
        pub title: String,
        pub category: IncidentCategory,
        pub status: IncidentStatus,
        pub area_code: String,
        pub location: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub latitude: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub longitude: Option<f64>,
        pub created_at: Timestamp,
    }

    /// Coordinates of an approved incident for map rendering
    pub struct IncidentPin {
        #[serde(rename = "_id")]
        pub id: String,
        pub category: IncidentCategory,
        pub latitude: f64,
        pub longitude: f64,
    }
);

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IncidentStatus::Pending => "pending",
            IncidentStatus::Approved => "approved",
            IncidentStatus::UnderProcess => "under process",
            IncidentStatus::Rejected => "rejected",
            IncidentStatus::ProblemSolved => "problem solved",
        })
    }
}

impl IncidentStatus {
    /// Statuses the given actor may transition an incident into
    pub fn settable_by(is_admin: bool, is_owner: bool) -> &'static [IncidentStatus] {
        if is_admin {
            &[
                IncidentStatus::Pending,
                IncidentStatus::Approved,
                IncidentStatus::UnderProcess,
                IncidentStatus::Rejected,
                IncidentStatus::ProblemSolved,
            ]
        } else if is_owner {
            // Self-archive and unarchive only, never self-approve
            &[
                IncidentStatus::ProblemSolved,
                IncidentStatus::Rejected,
                IncidentStatus::Pending,
            ]
        } else {
            &[]
        }
    }
}

/// Whether a candidate string looks like spam
///
/// Catches degenerate input (too short), consonant-cluster gibberish
/// (almost no vowels) and keyboard mashing (long runs of one character).
pub fn is_spam(text: &str) -> bool {
    let length = text.chars().count();
    if length < SPAM_MIN_LENGTH {
        return true;
    }

    if length > SPAM_VOWEL_MIN_LENGTH {
        let vowels = text
            .chars()
            .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
            .count();

        if (vowels as f64) / (length as f64) < SPAM_VOWEL_RATIO {
            return true;
        }
    }

    let mut run = 0;
    let mut last = None;
    for c in text.chars() {
        if Some(c) == last {
            run += 1;
            if run >= SPAM_RUN_LENGTH {
                return true;
            }
        } else {
            run = 1;
            last = Some(c);
        }
    }

    false
}

#[allow(clippy::disallowed_methods)]
#[allow(clippy::too_many_arguments)]
impl Incident {
    /// File a new incident
    ///
    /// Reports flagged by the spam heuristic are still persisted but
    /// arrive directly in `Rejected` status and notify their owner.
    pub async fn create(
        db: &Database,
        author: &User,
        title: String,
        description: String,
        category: IncidentCategory,
        location: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        area_code: String,
        image_url: Option<String>,
        allow_messages: bool,
    ) -> Result<Incident> {
        let flagged = is_spam(&title) || is_spam(&description);

        let now = Timestamp::now_utc();
        let incident = Incident {
            id: ulid::Ulid::new().to_string(),
            author_id: author.id.to_string(),
            title,
            description,
            category,
            location,
            latitude,
            longitude,
            status: if flagged {
                IncidentStatus::Rejected
            } else {
                IncidentStatus::Pending
            },
            area_code,
            important: false,
            image_url,
            allow_messages,
            acknowledged_by: vec![],
            created_at: now,
            updated_at: now,
        };

        db.insert_incident(&incident).await?;

        if flagged {
            Notification::emit(
                db,
                Some(incident.author_id.clone()),
                "Report automatically rejected".to_string(),
                "Your report was flagged as spam and rejected. \
                 Contact an administrator if you believe this is a mistake."
                    .to_string(),
                NotificationKind::Moderation,
                Some(format!("/incidents/{}", incident.id)),
            )
            .await;
        }

        Ok(incident)
    }

    /// Update this incident
    pub async fn update(
        &mut self,
        db: &Database,
        partial: PartialIncident,
        remove: Vec<FieldsIncident>,
    ) -> Result<()> {
        for field in &remove {
            self.remove_field(field);
        }

        self.apply_options(partial.clone());
        db.update_incident(&self.id, &partial, remove).await
    }

    /// Remove a field from this incident
    pub fn remove_field(&mut self, field: &FieldsIncident) {
        match field {
            FieldsIncident::ImageUrl => self.image_url = None,
        }
    }

    /// Apply a status and/or importance change on behalf of an actor
    ///
    /// Enforces the transition table, then emits the owner notification,
    /// audit entry and thread cleanup side effects.
    pub async fn moderate(
        &mut self,
        db: &Database,
        actor: &User,
        status: Option<IncidentStatus>,
        important: Option<bool>,
    ) -> Result<()> {
        let is_owner = actor.id == self.author_id;

        if important.is_some() {
            actor.require_admin()?;
        }

        if let Some(target) = status {
            let allowed = IncidentStatus::settable_by(actor.is_admin(), is_owner);
            if allowed.is_empty() {
                return Err(create_error!(NotElevated));
            }

            // The actor may moderate, just not into this status
            if !allowed.contains(&target) {
                return Err(create_error!(InvalidStatusTransition {
                    status: target.to_string()
                }));
            }
        }

        let previous_status = self.status;
        let previous_important = self.important;

        self.update(
            db,
            PartialIncident {
                status,
                important,
                updated_at: Some(Timestamp::now_utc()),
                ..Default::default()
            },
            vec![],
        )
        .await?;

        if let Some(new_status) = status {
            if new_status != previous_status && !is_owner {
                Notification::emit(
                    db,
                    Some(self.author_id.clone()),
                    "Report status updated".to_string(),
                    format!("Your report \"{}\" is now {}.", self.title, new_status),
                    NotificationKind::StatusChange,
                    Some(format!("/incidents/{}", self.id)),
                )
                .await;
            }

            // First approval earns the reporter their reward points
            if new_status == IncidentStatus::Approved
                && previous_status != IncidentStatus::Approved
            {
                if let Ok(author) = db.fetch_user(&self.author_id).await {
                    let partial = PartialUser {
                        reward_points: Some(author.reward_points + APPROVAL_REWARD_POINTS),
                        ..Default::default()
                    };

                    if let Err(error) = db.update_user(&author.id, &partial, vec![]).await {
                        warn!("Failed to award reward points: {error:?}");
                    }
                }
            }

            // A solved incident closes its conversations
            if new_status == IncidentStatus::ProblemSolved {
                db.delete_threads_for_incident(&self.id).await?;
            }
        }

        AuditLogEntry::log(
            db,
            actor,
            "incident_moderate",
            AuditTargetType::Incident,
            self.id.clone(),
            serde_json::json!({
                "status": {
                    "from": previous_status,
                    "to": self.status,
                },
                "important": {
                    "from": previous_important,
                    "to": self.important,
                },
            })
            .to_string(),
        )
        .await;

        Ok(())
    }

    /// Apply one moderation change to a set of incidents
    ///
    /// Unknown ids are silently omitted, the affected count is returned.
    pub async fn bulk_moderate(
        db: &Database,
        actor: &User,
        ids: &[String],
        status: Option<IncidentStatus>,
        important: Option<bool>,
    ) -> Result<usize> {
        let mut affected = 0;
        for id in ids {
            let mut incident = match db.fetch_incident(id).await {
                Ok(incident) => incident,
                Err(_) => continue,
            };

            incident.moderate(db, actor, status, important).await?;
            affected += 1;
        }

        Ok(affected)
    }

    /// Record that a member has seen this incident
    pub async fn acknowledge(&mut self, db: &Database, user_id: &str) -> Result<()> {
        db.add_acknowledgement(&self.id, user_id).await?;
        if !self.acknowledged_by.iter().any(|id| id == user_id) {
            self.acknowledged_by.push(user_id.to_string());
        }

        Ok(())
    }

    /// Delete this incident and its conversations
    pub async fn delete(self, db: &Database) -> Result<()> {
        db.delete_threads_for_incident(&self.id).await?;
        db.delete_incident(&self.id).await
    }

    /// Strip reporter-identifying fields for public endpoints
    pub fn into_public(self) -> PublicIncident {
        PublicIncident {
            id: self.id,
            title: self.title,
            category: self.category,
            status: self.status,
            area_code: self.area_code,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
        }
    }

    /// Coordinates for map rendering, if the reporter shared any
    pub fn into_pin(self) -> Option<IncidentPin> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(IncidentPin {
                id: self.id,
                category: self.category,
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use beacon_result::ErrorType;

    use crate::{is_spam, Capability, Incident, IncidentCategory, IncidentStatus, User};

    #[test]
    fn spam_heuristic() {
        // Too short
        assert!(is_spam(""));
        assert!(is_spam("ab"));

        // Consonant-cluster gibberish
        assert!(is_spam("xkcbldf"));
        assert!(is_spam("qwrtzpsdfghjklm"));

        // Repeated-run rule applies regardless of vowel ratio
        assert!(is_spam("aaaaa bbbbb"));
        assert!(is_spam("Heeeeelp"));

        // Legitimate text
        assert!(!is_spam("Suspicious activity near the park"));
        assert!(!is_spam("Car broken into overnight"));
        assert!(!is_spam("abc"));

        // At most five characters, the vowel rule does not apply
        assert!(!is_spam("bcdfg"));
    }

    #[test]
    fn transition_table() {
        let all = IncidentStatus::settable_by(true, false);
        assert_eq!(all.len(), 5);

        let owner = IncidentStatus::settable_by(false, true);
        assert!(owner.contains(&IncidentStatus::ProblemSolved));
        assert!(owner.contains(&IncidentStatus::Rejected));
        assert!(owner.contains(&IncidentStatus::Pending));
        assert!(!owner.contains(&IncidentStatus::Approved));
        assert!(!owner.contains(&IncidentStatus::UnderProcess));

        assert!(IncidentStatus::settable_by(false, false).is_empty());
    }

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

        let mut admin = User::create(
            db,
            "admin@example.com".to_string(),
            "hash".to_string(),
            "Admin".to_string(),
            None,
        )
        .await
        .unwrap();

        admin
            .update(
                db,
                crate::PartialUser {
                    capabilities: Some(vec![Capability::Member, Capability::Admin]),
                    ..Default::default()
                },
                vec![],
            )
            .await
            .unwrap();

        let incident = Incident::create(
            db,
            &owner,
            "Broken streetlight".to_string(),
            "The light on Main Street has been out for a week.".to_string(),
            IncidentCategory::Hazard,
            "Main Street".to_string(),
            None,
            None,
            "AREA01".to_string(),
            None,
            true,
        )
        .await
        .unwrap();

        (owner, admin, incident)
    }

    #[async_std::test]
    async fn owner_cannot_self_approve() {
        database_test!(|db| async move {
            let (owner, admin, incident) = seed(&db).await;

            // Owners may moderate, just not into approval
            let mut incident_for_owner = incident.clone();
            let error = incident_for_owner
                .moderate(&db, &owner, Some(IncidentStatus::Approved), None)
                .await
                .unwrap_err();
            assert!(matches!(
                error.error_type,
                ErrorType::InvalidStatusTransition { .. }
            ));

            // Unrelated members have no say at all
            let stranger = User::create(
                &db,
                "stranger@example.com".to_string(),
                "hash".to_string(),
                "Stranger".to_string(),
                None,
            )
            .await
            .unwrap();
            let mut incident_for_stranger = incident.clone();
            let error = incident_for_stranger
                .moderate(&db, &stranger, Some(IncidentStatus::Pending), None)
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotElevated));

            let mut incident_for_admin = incident.clone();
            incident_for_admin
                .moderate(&db, &admin, Some(IncidentStatus::Approved), None)
                .await
                .unwrap();
            assert_eq!(
                db.fetch_incident(&incident.id).await.unwrap().status,
                IncidentStatus::Approved
            );

            // Owner may archive and unarchive their own report
            incident_for_owner = db.fetch_incident(&incident.id).await.unwrap();
            incident_for_owner
                .moderate(&db, &owner, Some(IncidentStatus::ProblemSolved), None)
                .await
                .unwrap();
            incident_for_owner
                .moderate(&db, &owner, Some(IncidentStatus::Pending), None)
                .await
                .unwrap();
        });
    }

    #[async_std::test]
    async fn spam_reports_arrive_rejected() {
        database_test!(|db| async move {
            let (owner, _, _) = seed(&db).await;

            let incident = Incident::create(
                &db,
                &owner,
                "xkcbldf".to_string(),
                "Something legitimate happened here.".to_string(),
                IncidentCategory::Other,
                "Somewhere".to_string(),
                None,
                None,
                "AREA01".to_string(),
                None,
                true,
            )
            .await
            .unwrap();

            assert_eq!(incident.status, IncidentStatus::Rejected);
            assert_eq!(
                db.fetch_incident(&incident.id).await.unwrap().status,
                IncidentStatus::Rejected
            );

            // The owner is told about the automatic rejection
            let notifications = db.list_notifications_for_user(&owner.id).await.unwrap();
            assert!(!notifications.is_empty());
        });
    }

    #[async_std::test]
    async fn importance_is_admin_only() {
        database_test!(|db| async move {
            let (owner, admin, incident) = seed(&db).await;

            let mut incident_for_owner = incident.clone();
            assert!(incident_for_owner
                .moderate(&db, &owner, None, Some(true))
                .await
                .is_err());

            let mut incident_for_admin = incident;
            incident_for_admin
                .moderate(&db, &admin, None, Some(true))
                .await
                .unwrap();
            assert!(db.fetch_incident(&incident_for_admin.id).await.unwrap().important);
        });
    }

    #[async_std::test]
    async fn bulk_moderation_skips_unknown_ids() {
        database_test!(|db| async move {
            let (owner, admin, incident) = seed(&db).await;

            let other = Incident::create(
                &db,
                &owner,
                "Fence vandalised".to_string(),
                "Graffiti on the north fence.".to_string(),
                IncidentCategory::Vandalism,
                "North fence".to_string(),
                None,
                None,
                "AREA01".to_string(),
                None,
                true,
            )
            .await
            .unwrap();

            let affected = Incident::bulk_moderate(
                &db,
                &admin,
                &[
                    incident.id.clone(),
                    "01J00000000000000000000000".to_string(),
                    other.id.clone(),
                ],
                Some(IncidentStatus::Approved),
                None,
            )
            .await
            .unwrap();

            assert_eq!(affected, 2);
            assert_eq!(
                db.fetch_incident(&other.id).await.unwrap().status,
                IncidentStatus::Approved
            );
        });
    }
}
