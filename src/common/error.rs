use crate::common::data::Method;
use thiserror::Error;

/// Error type a route handler may fail with. It is handed back to the caller unchanged
/// through [`Error::Handler`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no route registered for {method} {uri}\nregistered routes:\n{routes}")]
    UnmatchedRoute {
        method: Method,
        uri: String,
        routes: String,
    },
    #[error(transparent)]
    Handler(BoxError),
    #[error("invalid path pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("invalid request URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("invalid status code: {0}")]
    InvalidStatusCode(#[from] http::status::InvalidStatusCode),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("no body encoder registered for content type {0:?}")]
    UnsupportedContentType(String),
    #[error("cannot encode response body: {0}")]
    BodyEncoding(String),
    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if no registered route matched the request.
    pub fn is_unmatched_route(&self) -> bool {
        matches!(self, Error::UnmatchedRoute { .. })
    }

    /// Returns the error a route handler failed with, if this is one.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            Error::Handler(err) => Some(err),
            _ => None,
        }
    }
}
