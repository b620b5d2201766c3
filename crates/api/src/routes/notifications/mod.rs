use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod list_notifications;
mod mark_read;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        list_notifications::list_notifications,
        mark_read::mark_read,
    ]
}
