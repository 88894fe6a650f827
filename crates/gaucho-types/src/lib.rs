//! Shared domain types for the GauchoChat opener toolkit.
//!
//! Conversation turns, generation requests, configuration, evaluation log
//! records and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod report;
