use folio_shared::ValidationError;

/// Failures talking to the hosted backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Credentials rejected or session no longer valid
    #[error("authentication failed: {0}")]
    Auth(String),

    /// An admin operation was attempted without signing in
    #[error("not signed in")]
    NotSignedIn,

    /// The backend answered with a non-success status
    #[error("{operation} failed with status {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// A lookup by id matched nothing
    #[error("{0} not found")]
    NotFound(String),

    /// Input rejected before sending
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport or decoding failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BackendError>;

impl BackendError {
    /// Build a status error from a failed response, keeping the backend's
    /// own message when it sent one.
    pub(crate) async fn from_response(operation: &'static str, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["message", "msg", "error_description", "error"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
            })
            .unwrap_or(body);

        BackendError::Status {
            operation,
            status,
            message,
        }
    }
}
