//! Conversation-opener generation.
//!
//! - `history`: reading turns and topical knowledge from the state holder
//! - `template`: building and rendering the prompt
//! - `filter`: turning raw model output into the opener text
//! - `fallback`: canned openers for when anything goes wrong
//! - `service`: the pipeline tying them together

pub mod fallback;
pub mod filter;
pub mod history;
pub mod service;
pub mod template;
