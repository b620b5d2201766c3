use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod acknowledge;
mod bulk_moderate;
mod create_incident;
mod delete_incident;
mod edit_importance;
mod edit_status;
mod fetch_incident;
mod list_incidents;
mod list_mine;
mod public_map;
mod public_recent;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        create_incident::create_incident,
        fetch_incident::fetch_incident,
        list_incidents::list_incidents,
        list_mine::list_mine,
        edit_status::edit_status,
        edit_importance::edit_importance,
        bulk_moderate::bulk_moderate,
        acknowledge::acknowledge,
        delete_incident::delete_incident,
        public_recent::public_recent,
        public_map::public_map,
    ]
}
