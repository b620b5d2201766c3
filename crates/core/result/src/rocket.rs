use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};

use crate::{Error, ErrorType};

/// HTTP response builder for Error enum
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = match self.error_type {
            ErrorType::LabelMe => Status::InternalServerError,

            ErrorType::NotAuthenticated => Status::Unauthorized,
            ErrorType::InvalidSession => Status::Unauthorized,
            ErrorType::InvalidCredentials => Status::Unauthorized,

            ErrorType::NotElevated => Status::Forbidden,
            ErrorType::NotPrivileged => Status::Forbidden,
            ErrorType::CannotDeleteYourself => Status::Forbidden,
            ErrorType::NotParticipant => Status::Forbidden,
            ErrorType::Suspended => Status::Forbidden,

            ErrorType::UnknownUser => Status::NotFound,
            ErrorType::UnknownIncident => Status::NotFound,
            ErrorType::UnknownAreaCode => Status::NotFound,
            ErrorType::UnknownMessage => Status::NotFound,
            ErrorType::UnknownReport => Status::NotFound,
            ErrorType::NotFound => Status::NotFound,

            ErrorType::EmailTaken => Status::Conflict,
            ErrorType::AreaCodeTaken => Status::Conflict,
            ErrorType::AreaCodeInUse => Status::Conflict,

            ErrorType::FailedValidation { .. } => Status::BadRequest,
            ErrorType::InvalidOperation => Status::BadRequest,
            ErrorType::InvalidStatusTransition { .. } => Status::BadRequest,
            ErrorType::NoRecipient => Status::BadRequest,
            ErrorType::MessagesDisabled => Status::BadRequest,
            ErrorType::IncidentFlaggedAsSpam { .. } => Status::BadRequest,
            ErrorType::CannotReportYourself => Status::BadRequest,
            ErrorType::EmptyMessage => Status::UnprocessableEntity,
            ErrorType::InvalidProperty => Status::BadRequest,

            ErrorType::DatabaseError { .. } => Status::InternalServerError,
            ErrorType::InternalError => Status::InternalServerError,
        };

        // Serialize the error data structure into JSON.
        let string = serde_json::to_string(&self).unwrap();

        // Build and send the request.
        Response::build()
            .sized_body(string.len(), Cursor::new(string))
            .header(ContentType::new("application", "json"))
            .status(status)
            .ok()
    }
}
