use serde::Deserialize;
use thiserror::Error;

/// Failures surfaced by a completion API client. Only
/// `ContextOverflow` is recoverable by the chat adapter, everything
/// else is handed back to the caller as is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("context length exceeded: {0}")]
    ContextOverflow(String),

    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed completion response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_context_overflow(&self) -> bool {
        matches!(self, ApiError::ContextOverflow(_))
    }
}

// {
//     "error": {
//         "message": "This model's maximum context length is 4097 tokens...",
//         "type": "invalid_request_error",
//         "param": "messages",
//         "code": "context_length_exceeded"
//     }
// }
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

const CONTEXT_LENGTH_EXCEEDED: &str = "context_length_exceeded";

/// Maps a non-success response to an `ApiError`. Older models report
/// overflow without an error code so the message is checked too.
pub fn classify_error(status: u16, body: &str) -> ApiError {
    if (400..500).contains(&status) {
        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
            let by_code = error.code.as_deref() == Some(CONTEXT_LENGTH_EXCEEDED);
            let by_message = error
                .message
                .as_deref()
                .is_some_and(|m| m.contains("maximum context length"));
            if by_code || by_message {
                return ApiError::ContextOverflow(error.message.unwrap_or_default());
            }
        }
    }

    ApiError::Status {
        status,
        body: body.to_string(),
    }
}
