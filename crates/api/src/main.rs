#[macro_use]
extern crate rocket;
#[macro_use]
extern crate rocket_okapi;

pub mod routes;
pub mod util;

use rocket_cors::AllowedOrigins;
use std::str::FromStr;

use beacon_database::DatabaseInfo;

#[launch]
async fn rocket() -> _ {
    // Configure logging and environment
    beacon_config::configure!();

    // Setup database
    let db = DatabaseInfo::Auto.connect().await.expect("database");
    db.migrate_database()
        .await
        .expect("Failed to migrate database");

    // Configure CORS
    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: ["Get", "Put", "Post", "Delete", "Options", "Head", "Patch"]
            .iter()
            .map(|s| FromStr::from_str(s).expect("valid method"))
            .collect(),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to create CORS");

    // Configure Rocket
    let rocket = rocket::build();
    routes::mount(rocket)
        .mount("/", rocket_cors::catch_all_options_routes())
        .mount(
            "/swagger/",
            rocket_okapi::swagger_ui::make_swagger_ui(&rocket_okapi::swagger_ui::SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .manage(db)
        .manage(cors.clone())
        .attach(cors)
}
