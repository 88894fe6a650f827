//! Cleaning raw model output into a user-facing opener.
//!
//! Two steps: a [`DialogueExtractor`] removes prompt echo and role artifacts,
//! then the text is cut at the first [`TURN_DELIMITER`].

use gaucho_types::chat::MessageRole;
use gaucho_types::error::FilterError;

use super::template::ConversationTemplate;

/// Section marker some models emit when they start inventing a new turn.
pub const TURN_DELIMITER: &str = "###";

/// Pulls the assistant's reply out of a raw completion.
pub trait DialogueExtractor: Send + Sync {
    fn extract(
        &self,
        raw: &str,
        prompt: &str,
        template: &ConversationTemplate,
        continued: bool,
    ) -> Result<String, FilterError>;
}

/// Default extractor driven by the template's role labels and separator.
///
/// - drops the prompt if the backend echoed it
/// - drops a leading `Assistant:` marker (not in continuation mode, where the
///   model extends the last message)
/// - cuts at the first separator or at a `Human:` line the model started
/// - trims surrounding whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleMarkerExtractor;

impl DialogueExtractor for RoleMarkerExtractor {
    fn extract(
        &self,
        raw: &str,
        prompt: &str,
        template: &ConversationTemplate,
        continued: bool,
    ) -> Result<String, FilterError> {
        let mut text = raw.strip_prefix(prompt).unwrap_or(raw);

        if !continued {
            let assistant_marker = format!("{}:", template.role_label(MessageRole::Assistant));
            let trimmed = text.trim_start();
            if let Some(rest) = trimmed.strip_prefix(assistant_marker.as_str()) {
                text = rest;
            }
        }

        let human_line = format!("\n{}:", template.role_label(MessageRole::Human));
        let cut = [template.separator(), human_line.as_str()]
            .iter()
            .filter_map(|marker| text.find(marker))
            .min();
        if let Some(end) = cut {
            text = &text[..end];
        }

        Ok(text.trim().to_string())
    }
}

/// Keep only the text before the first [`TURN_DELIMITER`].
///
/// Plain substring split; whitespace around the cut is kept as is.
pub fn truncate_at_delimiter(text: &str) -> &str {
    match text.find(TURN_DELIMITER) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Extraction followed by delimiter truncation.
pub struct ResponseFilter {
    extractor: Box<dyn DialogueExtractor>,
}

impl ResponseFilter {
    pub fn new<E: DialogueExtractor + 'static>(extractor: E) -> Self {
        Self {
            extractor: Box::new(extractor),
        }
    }

    /// Produce the opener shown to the user.
    ///
    /// A completion that cleans up to nothing but whitespace is an error, so
    /// the caller falls back instead of sending an empty opener.
    pub fn filter(
        &self,
        raw: &str,
        prompt: &str,
        template: &ConversationTemplate,
        continued: bool,
    ) -> Result<String, FilterError> {
        let extracted = self.extractor.extract(raw, prompt, template, continued)?;
        let response = truncate_at_delimiter(&extracted);
        if response.trim().is_empty() {
            return Err(FilterError::EmptyCompletion);
        }
        Ok(response.to_string())
    }
}

impl Default for ResponseFilter {
    fn default() -> Self {
        Self::new(RoleMarkerExtractor)
    }
}
