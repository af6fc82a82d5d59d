use reqwest::StatusCode;
use thiserror::Error;

/// Failure while phrasing a message through the chat completion API.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("LLM API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The completion contained no usable text.
    #[error("LLM API returned an empty completion")]
    EmptyResponse,
}
