use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome, Request};

use beacon_result::{create_error, Error};

use crate::{Database, User};

#[rocket::async_trait]
impl<'r> FromRequest<'r> for User {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let user: &Option<User> = request
            .local_cache_async(async {
                let db = request.rocket().state::<Database>().expect("`Database`");

                let header_session_token = request
                    .headers()
                    .get("x-session-token")
                    .next()
                    .map(|x| x.to_string());

                if let Some(token) = header_session_token {
                    if let Ok(session) = db.fetch_session_by_token(&token).await {
                        if let Ok(user) = db.fetch_user(&session.user_id).await {
                            return Some(user);
                        }
                    }
                }

                None
            })
            .await;

        if let Some(user) = user {
            Outcome::Success(user.clone())
        } else {
            Outcome::Error((Status::Unauthorized, create_error!(InvalidSession)))
        }
    }
}

/// Soft-authentication guard, degrades to an anonymous view
/// instead of failing the request
pub struct MaybeUser(pub Option<User>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for MaybeUser {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match request.guard::<User>().await {
            Outcome::Success(user) => Outcome::Success(MaybeUser(Some(user))),
            _ => Outcome::Success(MaybeUser(None)),
        }
    }
}
