//! Opener evaluation log records.

use serde::{Deserialize, Serialize};

/// One line of an opener evaluation log.
///
/// Logs are newline-delimited JSON; fields other than these three are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenerLogRecord {
    /// System preamble the opener was generated with.
    #[serde(rename = "Opener_prompt")]
    pub opener_prompt: String,
    /// User input of the test case.
    pub text: String,
    /// Opener the bot produced.
    pub response: String,
}
