//! API Boundary
//!
//! The one call the core makes to its own origin: POST a question, get an
//! answer and share id back. A non-2xx status, an error body, or a body
//! failing shape validation are all the same failure to the core.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Question submission body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub question: String,
}

impl AskRequest {
    /// Validate and build a request: trimmed, 1 to `max_len` characters
    pub fn new(question: &str, max_len: usize) -> Result<Self, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::EmptyQuestion);
        }
        if question.chars().count() > max_len {
            return Err(AppError::QuestionTooLong { max: max_len });
        }
        Ok(Self {
            question: question.to_string(),
        })
    }
}

/// Successful response shape
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AskSuccess {
    pub answer: String,
    #[serde(rename = "shareId")]
    pub share_id: String,
}

/// Raw response from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// What a completed submission means to the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Success(AskSuccess),
    Failure,
}

/// The submission transport
pub trait QuestionTransport {
    /// POST the request to the endpoint and return the raw response
    fn ask(&mut self, endpoint: &str, request: &AskRequest)
        -> Result<TransportResponse, AppError>;
}

/// Interpret a transport response. Anything but a 2xx status with a valid
/// success body is a failure.
pub fn parse_outcome(response: &TransportResponse) -> AskOutcome {
    if !(200..300).contains(&response.status) {
        warn!("submission failed with status {}", response.status);
        return AskOutcome::Failure;
    }
    match serde_json::from_str::<AskSuccess>(&response.body) {
        Ok(success) => AskOutcome::Success(success),
        Err(err) => {
            warn!("submission response failed shape validation: {err}");
            AskOutcome::Failure
        }
    }
}
