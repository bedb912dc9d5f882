//! HTML rendering of domain errors.
//!
//! The domain error stays transport-agnostic; this adapter picks the status
//! code and renders `error.html`. Internal failures never reach the page
//! with their original message, only with the trace id that links them to
//! the server logs.

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
    web,
};
use askama::Template;
use tracing::{debug, error};

use super::templates::{ErrorTemplate, Layout};
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = %self.message(), "request failed");
        }

        let page = ErrorTemplate {
            layout: Layout::default(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_owned(),
            message: public_message(self).to_owned(),
            trace_id: self.trace_id().map(str::to_owned),
        };

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        match page.render() {
            Ok(body) => builder.content_type(ContentType::html()).body(body),
            Err(render_error) => {
                error!(error = %render_error, "error page failed to render");
                builder
                    .content_type(ContentType::plaintext())
                    .body(format!("{} {}", status.as_u16(), page.message))
            }
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

const NOT_FOUND_MESSAGE: &str = "The requested page does not exist.";

/// Fallback for unmatched routes.
pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found(NOT_FOUND_MESSAGE))
}

/// Path extraction config turning unparseable segments such as `/abc` or
/// `/archive/x` into the HTML 404 page.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        debug!(error = %err, path = %req.path(), "unparseable path segment");
        Error::not_found(NOT_FOUND_MESSAGE).into()
    })
}
