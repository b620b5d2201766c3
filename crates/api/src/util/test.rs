use std::ops::Deref;

use rocket::local::asynchronous::Client;

use beacon_database::{
    AreaCode, Capability, Database, DatabaseInfo, PartialUser, Session, User,
};

/// Local Rocket instance backed by an isolated in-memory database
pub struct TestHarness {
    client: Client,
    pub db: Database,
}

impl TestHarness {
    pub async fn new() -> TestHarness {
        let db = DatabaseInfo::Auto
            .connect()
            .await
            .expect("database connection");
        db.migrate_database().await.expect("migrations");

        let rocket = crate::routes::mount(rocket::build()).manage(db.clone());
        let client = Client::tracked(rocket)
            .await
            .expect("valid `Rocket` instance");

        TestHarness { client, db }
    }

    /// Create a member account with an open session
    pub async fn new_user(&self, email: &str) -> (User, Session) {
        let user = User::create(
            &self.db,
            email.to_string(),
            "hash".to_string(),
            "Test User".to_string(),
            None,
        )
        .await
        .expect("`User`");

        let session = Session::create(&self.db, &user, "test".to_string())
            .await
            .expect("`Session`");

        (user, session)
    }

    /// Replace an account's capability set
    pub async fn grant(&self, user: &mut User, capabilities: Vec<Capability>) {
        user.update(
            &self.db,
            PartialUser {
                capabilities: Some(capabilities),
                ..Default::default()
            },
            vec![],
        )
        .await
        .expect("capability update");
    }

    /// Register an active area to file incidents into
    pub async fn new_area(&self) -> AreaCode {
        AreaCode::create(&self.db, "Test Area".to_string(), None, "root".to_string())
            .await
            .expect("`AreaCode`")
    }
}

impl Deref for TestHarness {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
