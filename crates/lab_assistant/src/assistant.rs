use std::sync::Arc;
use std::time::Duration;

use lab_core::{SimulationState, WorksheetAnswers};

use crate::prompts::{grading_prompt, tutor_prompt};
use crate::{AssistantError, TextGenerator};

pub const GRADING_FALLBACK: &str = "Error connecting to the Lab Assistant. Please try again.";
pub const TUTOR_FALLBACK: &str = "I'm having trouble thinking right now. Ask me again in a moment.";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Grader and tutor in front of a [`TextGenerator`].
///
/// Never fails: transport errors, bad responses and timeouts are logged
/// and replaced by a fixed fallback message.
#[derive(Clone)]
pub struct LabAssistant {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl LabAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    pub async fn check_answers(&self, answers: &WorksheetAnswers) -> String {
        let prompt = grading_prompt(answers);
        self.complete(&prompt, "grading")
            .await
            .unwrap_or_else(|_| GRADING_FALLBACK.to_string())
    }

    pub async fn ask_tutor(&self, question: &str, state: &SimulationState) -> String {
        let prompt = tutor_prompt(question, state);
        self.complete(&prompt, "tutor")
            .await
            .unwrap_or_else(|_| TUTOR_FALLBACK.to_string())
    }

    async fn complete(&self, prompt: &str, purpose: &str) -> Result<String, AssistantError> {
        let result = match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await
        {
            Ok(result) => result,
            Err(_) => Err(AssistantError::Timeout(self.timeout)),
        };
        match &result {
            Ok(text) => tracing::debug!(purpose, chars = text.len(), "assistant replied"),
            Err(err) => {
                tracing::warn!(purpose, model = self.model(), "assistant call failed: {err}");
            }
        }
        result
    }
}
