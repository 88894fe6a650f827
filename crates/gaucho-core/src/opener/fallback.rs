//! Canned openers used when generation fails.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Built-in fallback openers.
pub const DEFAULT_FALLBACK_OPENERS: [&str; 5] = [
    "I'm a bot with imagination, so let's start with something fun! I'm curious, if you suddenly discovered how to teleport, where would you go?",
    "I'm a bot with imagination, so let's start with something fun! I'm curious, if you were given the opportunity to have dinner with any historical figure, who would you choose?",
    "I'm a bot with imagination, so let's start with something fun! I'm curious, if you could instantly learn any language, which one would you choose?",
    "I'm a bot with imagination, so let's start with something fun! I'm curious, if you could have a conversation with any animal, which animal would you choose?",
    "I'm a bot with imagination, so let's start with something fun! I'm curious, if you could have a time machine, would you rather go to the past or the future?",
];

/// Picks one opener uniformly at random from a fixed, non-empty list.
///
/// The choice ignores the failure cause and the conversation.
#[derive(Debug)]
pub struct FallbackSelector {
    openers: Vec<String>,
    rng: Mutex<StdRng>,
}

impl FallbackSelector {
    /// Selector over `openers` drawing from `rng`.
    ///
    /// An empty list falls back to [`DEFAULT_FALLBACK_OPENERS`] so the
    /// selector can always answer.
    pub fn new(openers: Vec<String>, rng: StdRng) -> Self {
        let openers = if openers.is_empty() {
            DEFAULT_FALLBACK_OPENERS.iter().map(|s| s.to_string()).collect()
        } else {
            openers
        };
        Self {
            openers,
            rng: Mutex::new(rng),
        }
    }

    /// Selector seeded from the operating system.
    pub fn from_os_rng(openers: Vec<String>) -> Self {
        Self::new(openers, StdRng::from_os_rng())
    }

    /// Deterministic selector for reproducible runs.
    pub fn seeded(openers: Vec<String>, seed: u64) -> Self {
        Self::new(openers, StdRng::seed_from_u64(seed))
    }

    pub fn openers(&self) -> &[String] {
        &self.openers
    }

    /// Whether `text` is one of this selector's openers.
    pub fn contains(&self, text: &str) -> bool {
        self.openers.iter().any(|o| o == text)
    }

    /// Choose an opener.
    pub fn select(&self) -> String {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let index = rng.random_range(0..self.openers.len());
        self.openers[index].clone()
    }
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::from_os_rng(Vec::new())
    }
}
