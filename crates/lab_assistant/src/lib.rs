//! `lab_assistant`: the lab's text-generation port.
//!
//! The simulation and the HTTP layer depend only on [`TextGenerator`] and
//! the never-failing [`LabAssistant`] wrapper; [`GeminiClient`] is one
//! adapter behind the port.

use std::future::Future;
use std::pin::Pin;

mod assistant;
mod error;
mod gemini;
pub mod prompts;

#[cfg(any(test, feature = "test-support"))]
pub mod fakes;

pub use assistant::{LabAssistant, DEFAULT_TIMEOUT, GRADING_FALLBACK, TUTOR_FALLBACK};
pub use error::AssistantError;
pub use gemini::{GeminiClient, DEFAULT_MODEL};

pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, AssistantError>> + Send + 'a>>;

/// Request/response port: an opaque prompt in, free text out.
///
/// No schema is promised on the returned text.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;

    /// Model or provider name, for `/meta` and logs.
    fn model(&self) -> &str;
}

/// Stand-in used when no provider is configured. Every request fails, so
/// callers see the fallback text.
pub struct UnavailableGenerator;

impl TextGenerator for UnavailableGenerator {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async { Err(AssistantError::MissingApiKey) })
    }

    fn model(&self) -> &str {
        "unavailable"
    }
}
