//! Infrastructure layer for GauchoChat.
//!
//! Contains the HTTP client for the model-serving backend, the config
//! loader, and file adapters for conversation state snapshots and
//! evaluation reports.

pub mod config;
pub mod llm;
pub mod report;
pub mod state;
