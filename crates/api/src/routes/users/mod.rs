use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod delete_user;
mod edit_user;
mod fetch_self;
mod fetch_user;
mod list_users;
mod login;
mod logout;
mod signup;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        signup::signup,
        login::login,
        logout::logout,
        fetch_self::fetch_self,
        fetch_user::fetch_user,
        list_users::list_users,
        edit_user::edit_user,
        delete_user::delete_user,
    ]
}
