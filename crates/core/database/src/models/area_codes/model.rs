use beacon_result::{Error, ErrorType, Result};
use iso8601_timestamp::Timestamp;
use rand::Rng;

use crate::{Capability, Database};

/// Alphabet area codes are drawn from
pub static CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of random characters in a generated code
pub const CODE_LENGTH: usize = 6;

/// How often we redraw on collision before giving up
const MAX_GENERATION_ATTEMPTS: usize = 8;

auto_derived_partial!(
    /// # Area Code
    ///
    /// Tenant partition scoping users and incidents to a region
    pub struct AreaCode {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Unique 6-8 character code
        pub code: String,
        /// Display name of the region
        pub name: String,
        /// Whether this area is accepting activity
        pub active: bool,
        /// Id of the super-admin who created this area
        pub created_by: String,
        /// Ids of admins assigned to this area
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub admins: Vec<String>,

        /// Cached number of users homed in this area
        #[serde(default)]
        pub user_count: i64,
        /// Cached number of incidents filed in this area
        #[serde(default)]
        pub incident_count: i64,

        /// When this area was created
        pub created_at: Timestamp,
    },
    "PartialAreaCode"
);

auto_derived!(
    /// Public result of validating an area code
    pub struct AreaCodeValidation {
        /// Whether the code exists and is active
        pub valid: bool,
        /// Display name of the region, if valid
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
    }
);

#[allow(clippy::disallowed_methods)]
impl AreaCode {
    /// Draw a candidate code from the alphabet
    pub fn generate_code(prefix: Option<&str>) -> String {
        let mut rng = rand::thread_rng();
        let mut code = prefix.unwrap_or_default().to_uppercase();
        for _ in 0..CODE_LENGTH {
            code.push(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char);
        }

        code
    }

    /// Create a new area, redrawing the code on collision
    ///
    /// The insert itself is the authority on uniqueness, the redraw
    /// loop only reacts to conflicts it reports.
    pub async fn create(
        db: &Database,
        name: String,
        prefix: Option<String>,
        created_by: String,
    ) -> Result<AreaCode> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let area = AreaCode {
                id: ulid::Ulid::new().to_string(),
                code: AreaCode::generate_code(prefix.as_deref()),
                name: name.clone(),
                active: true,
                created_by: created_by.clone(),
                admins: vec![],
                user_count: 0,
                incident_count: 0,
                created_at: Timestamp::now_utc(),
            };

            match db.insert_area_code(&area).await {
                Ok(()) => return Ok(area),
                Err(Error {
                    error_type: ErrorType::AreaCodeTaken,
                    ..
                }) => continue,
                Err(error) => return Err(error),
            }
        }

        Err(create_error!(InternalError))
    }

    /// Validate a code for public onboarding
    pub async fn validate(db: &Database, code: &str) -> AreaCodeValidation {
        match db.fetch_area_code_by_code(&code.to_uppercase()).await {
            Ok(area) if area.active => AreaCodeValidation {
                valid: true,
                name: Some(area.name),
            },
            _ => AreaCodeValidation {
                valid: false,
                name: None,
            },
        }
    }

    /// Assign admins to this area
    ///
    /// Both sides of the relation are updated by the same operation.
    pub async fn assign_admins(&mut self, db: &Database, admin_ids: Vec<String>) -> Result<()> {
        let users = db.fetch_users(&admin_ids).await?;
        if users.len() != admin_ids.len() {
            return Err(create_error!(UnknownUser));
        }

        if users.iter().any(|user| !user.has_capability(Capability::Admin)) {
            return Err(create_error!(InvalidOperation));
        }

        db.assign_area_admins(&self.id, &admin_ids).await?;

        for id in admin_ids {
            if !self.admins.contains(&id) {
                self.admins.push(id);
            }
        }

        Ok(())
    }

    /// Remove an admin from this area, inverse of assignment
    pub async fn remove_admin(&mut self, db: &Database, user_id: &str) -> Result<()> {
        db.remove_area_admin(&self.id, user_id).await?;
        self.admins.retain(|id| id != user_id);
        Ok(())
    }

    /// Flip the active flag
    pub async fn toggle_active(&mut self, db: &Database) -> Result<()> {
        let partial = PartialAreaCode {
            active: Some(!self.active),
            ..Default::default()
        };

        db.update_area_code(&self.id, &partial).await?;
        self.apply_options(partial);
        Ok(())
    }

    /// Recount users and incidents carrying this code
    ///
    /// A pure recomputation, safe to run on any cadence.
    pub async fn recompute_stats(&mut self, db: &Database) -> Result<()> {
        let partial = PartialAreaCode {
            user_count: Some(db.count_users_in_area(&self.code).await? as i64),
            incident_count: Some(db.count_incidents_in_area(&self.code).await? as i64),
            ..Default::default()
        };

        db.update_area_code(&self.id, &partial).await?;
        self.apply_options(partial);
        Ok(())
    }

    /// Delete this area, refused while anything still references the code
    ///
    /// Assigned admins count as references too, they must be removed
    /// before the area can go.
    pub async fn delete(self, db: &Database) -> Result<()> {
        if !self.admins.is_empty()
            || db.count_users_in_area(&self.code).await? > 0
            || db.count_incidents_in_area(&self.code).await? > 0
        {
            return Err(create_error!(AreaCodeInUse));
        }

        db.delete_area_code(&self.id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{AreaCode, Capability, PartialUser, User, CODE_ALPHABET, CODE_LENGTH};

    #[test]
    fn generated_codes_use_the_alphabet() {
        for _ in 0..64 {
            let code = AreaCode::generate_code(None);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }

        let code = AreaCode::generate_code(Some("ab"));
        assert_eq!(code.len(), CODE_LENGTH + 2);
        assert!(code.starts_with("AB"));
    }

    #[async_std::test]
    async fn create_never_returns_duplicate_codes() {
        database_test!(|db| async move {
            let mut seen = std::collections::HashSet::new();
            for i in 0..32 {
                let area = AreaCode::create(&db, format!("Area {i}"), None, "admin".to_string())
                    .await
                    .unwrap();
                assert!(seen.insert(area.code), "duplicate code persisted");
            }
        });
    }

    #[async_std::test]
    async fn validate_inactive_code() {
        database_test!(|db| async move {
            let mut area = AreaCode::create(&db, "Area".to_string(), None, "admin".to_string())
                .await
                .unwrap();

            let validation = AreaCode::validate(&db, &area.code).await;
            assert!(validation.valid);
            assert_eq!(validation.name.as_deref(), Some("Area"));

            area.toggle_active(&db).await.unwrap();
            assert!(!AreaCode::validate(&db, &area.code).await.valid);

            assert!(!AreaCode::validate(&db, "NOSUCH").await.valid);
        });
    }

    #[async_std::test]
    async fn delete_blocked_by_dependents() {
        database_test!(|db| async move {
            let area = AreaCode::create(&db, "Area".to_string(), None, "admin".to_string())
                .await
                .unwrap();

            let mut user = User::create(
                &db,
                "member@example.com".to_string(),
                "hash".to_string(),
                "Member".to_string(),
                Some(area.code.clone()),
            )
            .await
            .unwrap();

            assert!(area.clone().delete(&db).await.is_err());

            user.update(
                &db,
                PartialUser::default(),
                vec![crate::FieldsUser::AreaCode],
            )
            .await
            .unwrap();

            area.delete(&db).await.unwrap();
        });
    }

    #[async_std::test]
    async fn delete_blocked_by_assigned_admins() {
        database_test!(|db| async move {
            let mut area = AreaCode::create(&db, "Area".to_string(), None, "root".to_string())
                .await
                .unwrap();

            let mut admin = User::create(
                &db,
                "admin@example.com".to_string(),
                "hash".to_string(),
                "Admin".to_string(),
                None,
            )
            .await
            .unwrap();

            admin
                .update(
                    &db,
                    PartialUser {
                        capabilities: Some(vec![Capability::Member, Capability::Admin]),
                        ..Default::default()
                    },
                    vec![],
                )
                .await
                .unwrap();

            area.assign_admins(&db, vec![admin.id.clone()])
                .await
                .unwrap();

            // No members or incidents, but an admin still holds the code
            let area = db.fetch_area_code(&area.id).await.unwrap();
            assert!(area.clone().delete(&db).await.is_err());

            let mut area = area;
            area.remove_admin(&db, &admin.id).await.unwrap();
            area.delete(&db).await.unwrap();
        });
    }

    #[async_std::test]
    async fn admin_assignment_is_symmetric() {
        database_test!(|db| async move {
            let mut area = AreaCode::create(&db, "Area".to_string(), None, "root".to_string())
                .await
                .unwrap();

            let mut admin = User::create(
                &db,
                "admin@example.com".to_string(),
                "hash".to_string(),
                "Admin".to_string(),
                None,
            )
            .await
            .unwrap();

            // Plain members cannot be assigned
            assert!(area
                .assign_admins(&db, vec![admin.id.clone()])
                .await
                .is_err());

            admin
                .update(
                    &db,
                    PartialUser {
                        capabilities: Some(vec![Capability::Member, Capability::Admin]),
                        ..Default::default()
                    },
                    vec![],
                )
                .await
                .unwrap();

            area.assign_admins(&db, vec![admin.id.clone()])
                .await
                .unwrap();

            let area = db.fetch_area_code(&area.id).await.unwrap();
            let admin = db.fetch_user(&admin.id).await.unwrap();
            assert!(area.admins.contains(&admin.id));
            assert!(admin.assigned_areas.contains(&area.code));

            let mut area = area;
            area.remove_admin(&db, &admin.id).await.unwrap();

            let area = db.fetch_area_code(&area.id).await.unwrap();
            let admin = db.fetch_user(&admin.id).await.unwrap();
            assert!(!area.admins.contains(&admin.id));
            assert!(!admin.assigned_areas.contains(&area.code));
        });
    }
}
