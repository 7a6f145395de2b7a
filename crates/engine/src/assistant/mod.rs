//! AI writing collaborator
//!
//! One generation at a time, prompt templates keyed by what is being written,
//! results returned as plain text for the caller to commit through the store
//! (append a text block, or replace a character description). No retries, no
//! streaming, no cancellation.

pub mod ollama;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;
use worldloom_domain::World;

use crate::ports::{LlmError, LlmPort, LlmRequest};

pub use ollama::OllamaClient;

/// Fixed system instruction for every generation.
pub const SYSTEM_INSTRUCTION: &str = "You are a professional worldbuilding architect and \
novelist's assistant. Keep answers concise, inventive, and internally consistent.";

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("the AI collaborator is not configured")]
    NotConfigured,
    #[error("a generation is already in progress")]
    Busy,
    #[error("generation failed, please try again")]
    Generation(#[source] LlmError),
}

/// What the collaborator is asked to write.
#[derive(Debug, Clone, Copy)]
pub enum PromptTarget<'a> {
    WorldDescription,
    Concept { title: &'a str, category: &'a str },
    Character { name: &'a str, role: &'a str },
    Lore { title: &'a str, category: &'a str },
}

/// Build the user prompt from the active world's name and genre.
pub fn build_prompt(world: &World, target: PromptTarget<'_>) -> String {
    match target {
        PromptTarget::WorldDescription => format!(
            "Write an evocative introduction for \"{}\", a {} world.",
            world.name, world.genre
        ),
        PromptTarget::Concept { title, category } => format!(
            "Design a distinctive concept for \"{}\". Subject: {} ({}). Style: {}.",
            world.name, title, category, world.genre
        ),
        PromptTarget::Character { name, role } => format!(
            "Within the world \"{}\", write a detailed character profile. \
             Name and occupation for reference: {} ({}).",
            world.name, name, role
        ),
        PromptTarget::Lore { title, category } => format!(
            "Write a piece of background lore for the world \"{}\" about \"{}\" ({}): \
             a legend, artifact, organization, or history.",
            world.name, title, category
        ),
    }
}

/// The collaborator facade the editor talks to.
pub struct Assistant {
    llm: Option<Arc<dyn LlmPort>>,
    busy: AtomicBool,
}

impl Assistant {
    pub fn new(llm: Option<Arc<dyn LlmPort>>) -> Self {
        Self {
            llm,
            busy: AtomicBool::new(false),
        }
    }

    /// Configured from the environment; unconfigured when no endpoint is set.
    pub fn from_env() -> Self {
        Self::new(
            OllamaClient::from_env().map(|client| Arc::new(client) as Arc<dyn LlmPort>),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Run one generation. Unconfigured assistants fail before any request;
    /// concurrent calls are rejected rather than queued.
    pub async fn generate(
        &self,
        world: &World,
        target: PromptTarget<'_>,
    ) -> Result<String, AssistantError> {
        let llm = self.llm.as_ref().ok_or(AssistantError::NotConfigured)?;
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(AssistantError::Busy);
        }

        let request = LlmRequest::new(build_prompt(world, target)).with_system(SYSTEM_INSTRUCTION);
        let result = llm.generate(request).await;
        self.busy.store(false, Ordering::SeqCst);

        result.map_err(|e| {
            warn!(error = %e, "assistant generation failed");
            AssistantError::Generation(e)
        })
    }
}
