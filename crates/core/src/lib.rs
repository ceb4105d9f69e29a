//! # agentwiki Core
//!
//! Domain types, traits, and error definitions for the agentwiki retrieval
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators — the hosted language model and the
//! document retriever — are defined as traits here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod model;
pub mod retriever;
pub mod step;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ModelError, ParseError, Result, RetrieverError, TagError};
pub use message::{Message, Role};
pub use model::{GenerateRequest, Model};
pub use retriever::{Passage, Retriever};
pub use step::{AgentAction, AgentFinish, AgentOutcome, Step};
