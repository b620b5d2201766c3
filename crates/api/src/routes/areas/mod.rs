use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod assign_admins;
mod create_area;
mod delete_area;
mod list_areas;
mod recount_stats;
mod remove_admin;
mod toggle_active;
mod validate_code;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        create_area::create_area,
        validate_code::validate_code,
        assign_admins::assign_admins,
        remove_admin::remove_admin,
        toggle_active::toggle_active,
        recount_stats::recount_stats,
        list_areas::list_areas,
        delete_area::delete_area,
    ]
}
