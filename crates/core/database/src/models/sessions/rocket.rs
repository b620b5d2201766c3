use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome, Request};

use beacon_result::{create_error, Error};

use crate::{Database, Session};

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let db = request.rocket().state::<Database>().expect("`Database`");

        let header_session_token = request
            .headers()
            .get("x-session-token")
            .next()
            .map(|x| x.to_string());

        if let Some(token) = header_session_token {
            if let Ok(session) = db.fetch_session_by_token(&token).await {
                return Outcome::Success(session);
            }
        }

        Outcome::Error((Status::Unauthorized, create_error!(InvalidSession)))
    }
}
