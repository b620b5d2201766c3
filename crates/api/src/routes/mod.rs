use rocket_okapi::{okapi::openapi3::OpenApi, settings::OpenApiSettings};
pub use rocket::http::Status;
use rocket::{Build, Rocket};

mod areas;
mod audit;
mod incidents;
mod messages;
mod notifications;
mod root;
mod safety;
mod stats;
mod users;

pub fn mount(mut rocket: Rocket<Build>) -> Rocket<Build> {
    let settings = OpenApiSettings::default();

    mount_endpoints_and_merged_docs! {
        rocket, "/".to_owned(), settings,
        "/" => (vec![], custom_openapi_spec()),
        "" => openapi_get_routes_spec![root::root],
        "/users" => users::routes(),
        "/areas" => areas::routes(),
        "/incidents" => incidents::routes(),
        "/messages" => messages::routes(),
        "/safety" => safety::routes(),
        "/notifications" => notifications::routes(),
        "/audit" => audit::routes(),
        "/stats" => stats::routes()
    };

    rocket
}

fn custom_openapi_spec() -> OpenApi {
    use rocket_okapi::okapi::openapi3::*;

    OpenApi {
        openapi: OpenApi::default_version(),
        info: Info {
            title: "Beacon API".to_owned(),
            description: Some(
                "Community incident reporting and neighbourhood safety platform.".to_owned(),
            ),
            version: env!("CARGO_PKG_VERSION").to_string(),
            license: Some(License {
                name: "AGPLv3".to_owned(),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}
