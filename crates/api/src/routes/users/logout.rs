use rocket::State;

use beacon_database::{Database, Session};
use beacon_result::Result;

/// # Logout
///
/// Close the current session, the bearer token stops working
/// immediately.
#[openapi(tag = "Users")]
#[post("/logout")]
pub async fn logout(db: &State<Database>, session: Session) -> Result<()> {
    db.delete_session(&session.id).await
}

#[cfg(test)]
mod test {
    use rocket::http::{Header, Status};

    use crate::util::test::TestHarness;

    #[rocket::async_test]
    async fn logout_invalidates_the_token() {
        let harness = TestHarness::new().await;
        let (_, session) = harness.new_user("member@example.com").await;

        let response = harness
            .post("/users/logout")
            .header(Header::new("x-session-token", session.token.to_string()))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        // The same token is refused from now on
        let response = harness
            .post("/users/logout")
            .header(Header::new("x-session-token", session.token.to_string()))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);
    }
}
