//! Client for the generative-text tutor backend.
//!
//! - [`client`] -- reqwest wrapper around an OpenAI-compatible
//!   chat-completions API.
//! - [`generate`] -- multiplication task generation with defensive
//!   parsing of free-form model output.
//! - [`explain`] -- step-by-step explanations for a wrong answer.

pub mod client;
pub mod explain;
pub mod generate;

pub use client::{TutorClient, TutorConfig, TutorError};
pub use generate::GeneratedTask;
