//! Conversation history and opener result types.
//!
//! A conversation is read from the state holder as an ordered list of
//! [`ConversationTurn`]s. The opener pipeline answers with a single
//! [`GenerationResult`].

use serde::{Deserialize, Serialize};

/// Role label of a message inside a rendered conversation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Human,
    Assistant,
}

/// One user/bot exchange, oldest first in a history.
///
/// Both sides are optional: the latest turn of a history usually carries only
/// the user text, which marks the assistant reply as still to be generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<String>,
}

impl ConversationTurn {
    /// A turn where both sides have spoken.
    pub fn exchange(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            bot: Some(bot.into()),
        }
    }

    /// A turn still waiting for the bot's reply.
    pub fn pending(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            bot: None,
        }
    }

    /// User text, treating an empty string as absent.
    pub fn user_text(&self) -> Option<&str> {
        self.user.as_deref().filter(|s| !s.is_empty())
    }

    /// Bot text, treating an empty string as absent.
    pub fn bot_text(&self) -> Option<&str> {
        self.bot.as_deref().filter(|s| !s.is_empty())
    }
}

/// Final answer of the opener pipeline.
///
/// Serializes to `{"dialogue_response": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub dialogue_response: String,
}
