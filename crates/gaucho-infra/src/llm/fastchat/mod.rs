//! Client for a controller/worker model-serving stack.
//!
//! The controller maps model names to worker addresses; workers run the
//! model and stream NUL-delimited JSON chunks back.

pub mod client;
pub mod types;

pub use client::FastChatProvider;
