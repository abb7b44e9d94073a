//! HALFART - NYC art companion
//!
//! A chat client that turns "where and when" into gallery suggestions and a
//! walking route. A hosted model does the art-world reasoning; this crate
//! supplies the prompts, parses the structured block the model appends to
//! each reply, and reconciles it into local state.
//!
//! # Core Concepts
//!
//! - **One advisor session**: created on first use, reused for every turn
//! - **Payload, not prose**: only the fenced JSON block changes state
//! - **Shallow merges**: plan and profile patches replace whole fields
//! - **Profile on disk**: one JSON snapshot under a fixed blob key
//!
//! # Modules
//!
//! - [`advisor`] - Session wrapper and reply parsing
//! - [`state`] - App state, reconciliation and profile persistence
//! - [`domain`] - Galleries, plans, profiles and messages
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`prompts`] - Handlebars prompt templates
//! - [`view`] - Terminal renderers
//! - [`repl`] - Interactive chat loop
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod advisor;
pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod state;
pub mod view;

/// Blob key the user profile is stored under
pub const PROFILE_KEY: &str = "halfart_profile";

pub use advisor::{AdvisorPayload, AdvisorReply, AdvisorSession, parse_reply};
pub use config::Config;
pub use domain::{ActivePlan, Gallery, UserProfile};
pub use llm::{LlmClient, LlmError};
pub use state::{AppState, ProfileStore, SendOutcome, SessionFactory};
