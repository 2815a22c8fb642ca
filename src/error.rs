use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Every failure the client can surface.
///
/// Materialization itself never fails; these come from the transport,
/// from login, or from interpreting the body of a write action.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying HTTP client failed.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// A response body was not valid JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status code {status}")]
    UnexpectedStatus {
        /// Status received.
        status: StatusCode,
        /// Raw response body, kept for inspection.
        body: String,
    },

    /// Credentials were rejected, or no modhash came back from login.
    #[error("unable to log in")]
    LoginFailed,

    /// The call requires a logged-in session.
    #[error("must be logged in to make this call")]
    NotLoggedIn,

    /// A write action returned a non-empty `errors` list.
    #[error("upstream rejected the action: {0:?}")]
    Post(Vec<Value>),

    /// A successful response did not have the expected shape.
    #[error("unexpected response content: {0}")]
    UnexpectedResponse(Value),

    /// No next or previous page exists.
    #[error("{0}")]
    NoMore(&'static str),

    /// A thing is missing an attribute an action needs.
    #[error("thing has no `{0}` attribute")]
    MissingAttribute(&'static str),

    /// The client was configured inconsistently.
    #[error("{0}")]
    Config(String),
}
