//! Text-generation provider abstractions.
//!
//! - `LlmProvider`: RPITIT trait for concrete backend clients
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
