use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::Database;

auto_derived_partial!(
    /// # User
    pub struct User {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Unique lowercase email address
        pub email: String,
        /// Password hash
        pub password_hash: String,
        /// Name shown to other members
        pub display_name: String,

        /// Capabilities held by this user
        pub capabilities: Vec<Capability>,
        /// Home area code
        #[serde(skip_serializing_if = "Option::is_none")]
        pub area_code: Option<String>,
        /// Area codes this user administrates
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub assigned_areas: Vec<String>,

        /// Whether this user is suspended
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub suspended: bool,
        /// When the suspension lapses, indefinite if unset
        #[serde(skip_serializing_if = "Option::is_none")]
        pub suspended_until: Option<Timestamp>,
        /// Warnings issued against this user
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub warnings: Vec<Warning>,
        /// Reward points earned from community activity
        #[serde(default)]
        pub reward_points: i64,

        /// When this account was created
        pub created_at: Timestamp,
    },
    "PartialUser"
);

auto_derived!(
    /// Capability a user may hold, non-exclusive
    #[serde(rename_all = "snake_case")]
    #[derive(Copy, Eq)]
    pub enum Capability {
        Member,
        Admin,
        SuperAdmin,
    }

    /// Warning issued by a moderator
    pub struct Warning {
        /// Why this warning was issued
        pub reason: String,
        /// Id of the moderator who issued it
        pub moderator_id: String,
        /// When it was issued
        pub created_at: Timestamp,
    }

    /// User as exposed over the API, without credential data
    pub struct UserInfo {
        #[serde(rename = "_id")]
        pub id: String,
        pub email: String,
        pub display_name: String,
        pub capabilities: Vec<Capability>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub area_code: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub assigned_areas: Vec<String>,
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub suspended: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub suspended_until: Option<Timestamp>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub warnings: Vec<Warning>,
        pub reward_points: i64,
        pub created_at: Timestamp,
    }

    /// Optional fields on user object
    pub enum FieldsUser {
        AreaCode,
        SuspendedUntil,
    }
);

#[allow(clippy::disallowed_methods)]
impl User {
    /// Create a new user
    pub async fn create(
        db: &Database,
        email: String,
        password_hash: String,
        display_name: String,
        area_code: Option<String>,
    ) -> Result<User> {
        let email = email.trim().to_lowercase();

        // Best-effort pre-filter, the unique index is the authority
        if db.fetch_user_by_email(&email).await.is_ok() {
            return Err(create_error!(EmailTaken));
        }

        let user = User {
            id: ulid::Ulid::new().to_string(),
            email,
            password_hash,
            display_name,
            capabilities: vec![Capability::Member],
            area_code,
            assigned_areas: vec![],
            suspended: false,
            suspended_until: None,
            warnings: vec![],
            reward_points: 0,
            created_at: Timestamp::now_utc(),
        };

        db.insert_user(&user).await?;
        Ok(user)
    }

    /// Whether this user holds the given capability
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether this user may moderate (admin or super-admin)
    pub fn is_admin(&self) -> bool {
        self.has_capability(Capability::Admin) || self.has_capability(Capability::SuperAdmin)
    }

    /// Whether this user holds the super-admin capability
    pub fn is_super_admin(&self) -> bool {
        self.has_capability(Capability::SuperAdmin)
    }

    /// Guard requiring the admin capability
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(create_error!(NotElevated))
        }
    }

    /// Guard requiring the super-admin capability
    pub fn require_super_admin(&self) -> Result<()> {
        if self.is_super_admin() {
            Ok(())
        } else {
            Err(create_error!(NotPrivileged))
        }
    }

    /// Whether this user is currently suspended
    pub fn is_suspended(&self) -> bool {
        self.suspended
            && self
                .suspended_until
                .map(|until| until > Timestamp::now_utc())
                .unwrap_or(true)
    }

    /// Update this user
    pub async fn update(
        &mut self,
        db: &Database,
        partial: PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()> {
        for field in &remove {
            self.remove_field(field);
        }

        self.apply_options(partial.clone());
        db.update_user(&self.id, &partial, remove).await
    }

    /// Remove a field from this user
    pub fn remove_field(&mut self, field: &FieldsUser) {
        match field {
            FieldsUser::AreaCode => self.area_code = None,
            FieldsUser::SuspendedUntil => self.suspended_until = None,
        }
    }

    /// Strip credential data for presentation
    pub fn into_info(self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
            capabilities: self.capabilities,
            area_code: self.area_code,
            assigned_areas: self.assigned_areas,
            suspended: self.suspended,
            suspended_until: self.suspended_until,
            warnings: self.warnings,
            reward_points: self.reward_points,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use iso8601_timestamp::{Duration, Timestamp};

    use crate::{Capability, User};

    fn user_with(capabilities: Vec<Capability>) -> User {
        User {
            id: "user".to_string(),
            email: "user@example.com".to_string(),
            password_hash: String::new(),
            display_name: "User".to_string(),
            capabilities,
            area_code: None,
            assigned_areas: vec![],
            suspended: false,
            suspended_until: None,
            warnings: vec![],
            reward_points: 0,
            created_at: Timestamp::now_utc(),
        }
    }

    #[test]
    fn capability_predicates() {
        let member = user_with(vec![Capability::Member]);
        assert!(!member.is_admin());
        assert!(!member.is_super_admin());
        assert!(member.require_admin().is_err());

        let admin = user_with(vec![Capability::Member, Capability::Admin]);
        assert!(admin.is_admin());
        assert!(!admin.is_super_admin());
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_super_admin().is_err());

        let super_admin = user_with(vec![Capability::SuperAdmin]);
        assert!(super_admin.is_admin());
        assert!(super_admin.is_super_admin());
        assert!(super_admin.require_super_admin().is_ok());
    }

    #[test]
    fn suspension_expiry() {
        let mut user = user_with(vec![Capability::Member]);
        assert!(!user.is_suspended());

        user.suspended = true;
        assert!(user.is_suspended(), "indefinite suspension");

        user.suspended_until = Some(Timestamp::now_utc() + Duration::days(3));
        assert!(user.is_suspended());

        user.suspended_until = Some(Timestamp::now_utc() - Duration::days(3));
        assert!(!user.is_suspended(), "lapsed suspension");
    }
}
