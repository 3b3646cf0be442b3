use std::time::Duration;

/// Failures at the text-generation boundary. [`crate::LabAssistant`]
/// turns every one of these into fallback text.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("no API key configured (set API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("no response within {0:?}")]
    Timeout(Duration),
}
