use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod delete_thread;
mod fetch_thread;
mod list_conversations;
mod reply_message;
mod send_message;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        send_message::send_message,
        reply_message::reply_message,
        list_conversations::list_conversations,
        fetch_thread::fetch_thread,
        delete_thread::delete_thread,
    ]
}
