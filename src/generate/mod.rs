// src/generate/mod.rs
//! Player blueprint generation: seeded attributes, prompt building, the
//! primary prediction provider and its deterministic fallback.

pub mod blueprint;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod poller;
pub mod prompt;
pub mod provider;

pub use blueprint::{Blueprint, BlueprintOverrides};
pub use error::GenerationError;
pub use fallback::FallbackProvider;
pub use orchestrator::{GenerationRequest, GenerationResult, Orchestrator, ProviderTag};
pub use poller::{poll_prediction, PollPolicy};
pub use prompt::{build_prompt, prompt_preview, NEGATIVE_PROMPT};
pub use provider::{JobState, PredictionApi, PredictionInput, PredictionStatus, ReplicateClient};
