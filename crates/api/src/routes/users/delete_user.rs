use rocket::State;

use beacon_database::{
    util::reference::Reference, AuditLogEntry, AuditTargetType, Database, User,
};
use beacon_result::{create_error, Result};

/// # Delete User
///
/// Permanently delete an account and its sessions. Restricted to
/// super-admins; no caller may delete their own account through this
/// route, not even a super-admin.
#[openapi(tag = "Users")]
#[delete("/<target>")]
pub async fn delete_user(db: &State<Database>, user: User, target: Reference<'_>) -> Result<()> {
    user.require_super_admin()?;

    if target.id == user.id {
        return Err(create_error!(CannotDeleteYourself));
    }

    let target = target.as_user(db).await?;

    db.delete_sessions_for_user(&target.id).await?;
    db.delete_user(&target.id).await?;

    AuditLogEntry::log(
        db,
        &user,
        "user_delete",
        AuditTargetType::User,
        target.id,
        "{}".to_string(),
    )
    .await;

    Ok(())
}

#[cfg(test)]
mod test {
    use rocket::http::{Header, Status};

    use crate::util::test::TestHarness;
    use beacon_database::Capability;

    #[rocket::async_test]
    async fn cannot_delete_own_account() {
        let harness = TestHarness::new().await;
        let (mut user, session) = harness.new_user("root@example.com").await;
        harness
            .grant(&mut user, vec![Capability::Member, Capability::SuperAdmin])
            .await;

        let response = harness
            .delete(format!("/users/{}", user.id))
            .header(Header::new("x-session-token", session.token.to_string()))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Forbidden);
        let body = response.into_string().await.expect("body");
        assert!(body.contains("CannotDeleteYourself"));

        // The account survived
        assert!(harness.db.fetch_user(&user.id).await.is_ok());
    }

    #[rocket::async_test]
    async fn super_admin_deletes_other_accounts() {
        let harness = TestHarness::new().await;
        let (mut root, session) = harness.new_user("root@example.com").await;
        harness
            .grant(&mut root, vec![Capability::Member, Capability::SuperAdmin])
            .await;

        let (target, _) = harness.new_user("member@example.com").await;

        let response = harness
            .delete(format!("/users/{}", target.id))
            .header(Header::new("x-session-token", session.token.to_string()))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        assert!(harness.db.fetch_user(&target.id).await.is_err());
    }
}
