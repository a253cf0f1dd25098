//! Domain building blocks for the AdVocate campaign generator.
//!
//! Everything in this crate is synchronous. It holds the chat message
//! types and prompt templates, the environment configuration helpers, and
//! the text parsing that turns free-form model output into typed campaign
//! data.

pub mod campaign;
pub mod chat;
pub mod config;
pub mod error;
pub mod naming;
pub mod prompts;
pub mod record;
pub mod research;
pub mod stage;
pub mod text;
pub mod types;
