use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::SubmissionError;

/// The JSON body of every intake response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub message: String,
}

impl ResponseEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Fallback for every non-POST request on an intake endpoint.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(ResponseEnvelope::failure("Method not allowed"))
}

/// A body that does not decode carries none of the required fields.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error.cause_chain = ?err, "Rejecting an undecodable request body");
    let response = HttpResponse::BadRequest().json(ResponseEnvelope::failure(
        SubmissionError::MissingFields.to_string(),
    ));
    InternalError::from_response(err, response).into()
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
