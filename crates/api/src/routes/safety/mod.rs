use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod delete_report;
mod fetch_report;
mod file_report;
mod list_reports;
mod review_report;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        file_report::file_report,
        list_reports::list_reports,
        fetch_report::fetch_report,
        review_report::review_report,
        delete_report::delete_report,
    ]
}
