use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::debug;

/// Custom error type for gateway operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Inbound request used a method other than POST
    MethodNotAllowed(String)
  , /// Inbound body is not a valid prompt
    BadRequest(String)
  , /// Transport failure talking to the completion endpoint
    HttpError(String)
  , /// Completion endpoint answered with a non-success status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Failed to parse the completion endpoint response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Local I/O failure (binding the listener, serving)
    Io(String)
}

impl Error
{   /// HTTP status reported to the caller for this error
    pub fn status_code(&self) -> StatusCode
    {   match self
        {   Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED
          , Error::BadRequest(_) => StatusCode::BAD_REQUEST
          , Error::HttpError(_)
          | Error::ApiError { .. }
          | Error::ParseError(_)
          | Error::NoChoicesInResponse => StatusCode::FAILED_DEPENDENCY
          , Error::InvalidConfiguration(_)
          | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MethodNotAllowed(method) => {
              write!(f, "method {} not allowed", method)
            }
          , Error::BadRequest(msg) => {
              write!(f, "{}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "send_request: HTTP error: {}", msg)
            }
          , Error::ApiError { status, body } => {
              write!(f,
                "send_request: API error: status {}: {}",
                status, body
              )
            }
          , Error::ParseError(msg) => {
              write!(f, "send_request: parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

/// Every error reaches the caller as `{"error": "<message>"}`
impl IntoResponse for Error
{   fn into_response(self) -> Response
    {   let status = self.status_code();
        debug!("Responding with {}: {}", status, self);
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
