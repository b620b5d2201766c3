use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod list_audit;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![list_audit::list_audit]
}
