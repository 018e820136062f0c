//! Grokipedia - resilient client for the Grokipedia knowledge base
//!
//! Search and page retrieval with an in-memory TTL cache, exponential
//! backoff for transient failures and a four-kind error vocabulary, plus the
//! text rendering and agent server built on top of it.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod mcp;
pub mod models;
pub mod retry;

pub use client::GrokipediaClient;
pub use config::ClientConfig;
pub use error::{GrokipediaError, Result};
pub use retry::RetryPolicy;
