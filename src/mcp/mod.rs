//! Agent-protocol (MCP) server
//!
//! Exposes `grokipedia_search` and `grokipedia_get_page` over JSON-RPC 2.0
//! on stdio. Tool results are markdown text produced by [`crate::format`].

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
