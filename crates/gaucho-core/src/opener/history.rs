//! Reading conversation history out of the state holder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gaucho_types::chat::ConversationTurn;
use gaucho_types::error::HistoryError;

/// User attribute carrying free-text knowledge for the opener prompt.
pub const TOPICAL_KNOWLEDGE: &str = "topical_knowledge";

/// Read-only view of a conversation state holder.
///
/// The opener pipeline only ever reads from it.
pub trait ConversationStateSource: Send + Sync {
    /// Prior turns, oldest first.
    fn history(&self) -> Result<Vec<ConversationTurn>, HistoryError>;

    /// Look up a user attribute by name.
    fn user_attribute(&self, name: &str) -> Option<String>;
}

/// What the prompt builder needs from the state holder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    pub turns: Vec<ConversationTurn>,
    pub knowledge: Option<String>,
}

/// Extract turns and topical knowledge from a state source.
pub fn read_history(
    source: &dyn ConversationStateSource,
) -> Result<ConversationHistory, HistoryError> {
    let turns = source.history()?;
    let knowledge = source.user_attribute(TOPICAL_KNOWLEDGE);
    Ok(ConversationHistory { turns, knowledge })
}

/// Serializable snapshot of a conversation state.
///
/// ```json
/// {"history": [{"user": "hi"}], "user_attributes": {"topical_knowledge": "..."}}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub user_attributes: HashMap<String, serde_json::Value>,
}

impl StateSnapshot {
    pub fn new(history: Vec<ConversationTurn>) -> Self {
        Self {
            history,
            user_attributes: HashMap::new(),
        }
    }

    /// Set the topical knowledge attribute.
    pub fn with_knowledge(mut self, knowledge: impl Into<String>) -> Self {
        self.user_attributes.insert(
            TOPICAL_KNOWLEDGE.to_string(),
            serde_json::Value::String(knowledge.into()),
        );
        self
    }
}

impl ConversationStateSource for StateSnapshot {
    fn history(&self) -> Result<Vec<ConversationTurn>, HistoryError> {
        Ok(self.history.clone())
    }

    fn user_attribute(&self, name: &str) -> Option<String> {
        match self.user_attributes.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSource;

    impl ConversationStateSource for BrokenSource {
        fn history(&self) -> Result<Vec<ConversationTurn>, HistoryError> {
            Err(HistoryError::Unavailable("state manager offline".to_string()))
        }

        fn user_attribute(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_read_history_with_knowledge() {
        let snapshot = StateSnapshot::new(vec![ConversationTurn::pending("hi")])
            .with_knowledge("The user likes astronomy.");
        let history = read_history(&snapshot).unwrap();
        assert_eq!(history.turns, vec![ConversationTurn::pending("hi")]);
        assert_eq!(history.knowledge.as_deref(), Some("The user likes astronomy."));
    }

    #[test]
    fn test_read_history_does_not_mutate_source() {
        let snapshot = StateSnapshot::new(vec![ConversationTurn::exchange("a", "b")]);
        let _ = read_history(&snapshot).unwrap();
        let _ = read_history(&snapshot).unwrap();
        assert_eq!(snapshot.history.len(), 1);
    }

    #[test]
    fn test_read_history_propagates_errors() {
        let err = read_history(&BrokenSource).unwrap_err();
        assert!(matches!(err, HistoryError::Unavailable(_)));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "history": [{"user": "hello", "bot": "hi!"}, {"user": "what now?"}],
            "user_attributes": {"topical_knowledge": null, "age": 31}
        }"#;
        let snapshot: StateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.user_attribute(TOPICAL_KNOWLEDGE), None);
        assert_eq!(snapshot.user_attribute("age").as_deref(), Some("31"));
        assert_eq!(snapshot.user_attribute("missing"), None);
    }
}
