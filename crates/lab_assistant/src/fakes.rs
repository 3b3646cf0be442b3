//! Test doubles for the text-generation port.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::{AssistantError, GenerateFuture, TextGenerator};

/// Replies with fixed text and records every prompt it receives.
pub struct CannedGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl TextGenerator for CannedGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        self.prompts.lock().push(prompt.to_string());
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }

    fn model(&self) -> &str {
        "canned"
    }
}

/// Always fails with a server error.
pub struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async {
            Err(AssistantError::Status {
                status: 503,
                body: "quota exceeded".to_string(),
            })
        })
    }

    fn model(&self) -> &str {
        "failing"
    }
}

/// Never answers.
pub struct PendingGenerator;

impl TextGenerator for PendingGenerator {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(std::future::pending())
    }

    fn model(&self) -> &str {
        "pending"
    }
}

/// Holds each request until `release()`; `entered` fires when a request
/// arrives.
pub struct GatedGenerator {
    reply: String,
    pub entered: Arc<Notify>,
    gate: Arc<Notify>,
}

impl GatedGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            entered: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

impl TextGenerator for GatedGenerator {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            self.entered.notify_one();
            self.gate.notified().await;
            Ok(self.reply.clone())
        })
    }

    fn model(&self) -> &str {
        "gated"
    }
}
