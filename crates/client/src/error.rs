use serde::Deserialize;

/// Errors returned by [`LmsClient`](crate::LmsClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure or an undecodable response body.
    #[error("LMS request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Rejected locally by the request's validation schema; nothing was sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("LMS API error ({status}): {error}")]
    Api {
        status: u16,
        /// Machine-readable code such as `VALIDATION_ERROR`, when present.
        code: Option<String>,
        error: String,
    },
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::Validation(_) => None,
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(lms_core::validation::describe(&errors))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Error body rendered by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a status and raw response text.
    pub(crate) fn from_body(status: u16, text: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(text) {
            Ok(body) => ClientError::Api {
                status,
                code: body.code,
                error: body.error,
            },
            Err(_) => ClientError::Api {
                status,
                code: None,
                error: text.to_string(),
            },
        }
    }
}
