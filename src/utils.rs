use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct SuccessBody {
    pub success: bool,
    pub message: String,
}

impl SuccessBody {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
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

/// A request body that cannot be read as the expected JSON is not a
/// validation failure: it is reported as an unexpected error.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::error!(
        error.cause_chain = ?err,
        error.message = %err,
        path = %req.path(),
        "Failed to read the request body"
    );
    let response =
        HttpResponse::InternalServerError().json(ErrorBody::new(UNEXPECTED_ERROR_MESSAGE));
    InternalError::from_response(err, response).into()
}
