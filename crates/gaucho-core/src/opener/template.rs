//! Conversation template and prompt rendering.
//!
//! Prompts use the single-separator layout expected by the serving backend:
//!
//! ```text
//! {system}</s>Human: {user}</s>Assistant: {bot}</s>Human: {user}</s>Assistant:
//! ```
//!
//! A trailing `Assistant:` with no text is the turn the model will write.

use gaucho_types::chat::{ConversationTurn, MessageRole};
use gaucho_types::error::PromptError;

/// Role label for user messages.
pub const HUMAN_ROLE: &str = "Human";

/// Role label for bot messages.
pub const ASSISTANT_ROLE: &str = "Assistant";

/// Separator closing every message.
pub const SEPARATOR: &str = "</s>";

const KNOWLEDGE_PREFIX: &str = "\nHere's some external knowledge you can use when making your response: ";

/// A message inside a [`ConversationTemplate`]. `None` text marks the
/// assistant turn still to be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMessage {
    pub role: MessageRole,
    pub text: Option<String>,
}

/// System preamble plus ordered role-labelled messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTemplate {
    system: String,
    messages: Vec<TemplateMessage>,
}

impl ConversationTemplate {
    /// Empty conversation under the given system preamble.
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            messages: Vec::new(),
        }
    }

    /// Build a template from conversation history.
    ///
    /// Each turn contributes its user text under [`HUMAN_ROLE`] and its bot
    /// text under [`ASSISTANT_ROLE`]; a turn without bot text contributes a
    /// pending assistant message. Only the last turn may be pending.
    pub fn from_history(
        system: impl Into<String>,
        turns: &[ConversationTurn],
    ) -> Result<Self, PromptError> {
        let mut template = Self::new(system);
        let last = turns.len().saturating_sub(1);

        for (index, turn) in turns.iter().enumerate() {
            if let Some(user) = turn.user_text() {
                template.append_message(MessageRole::Human, Some(user));
            }
            match turn.bot_text() {
                Some(bot) => template.append_message(MessageRole::Assistant, Some(bot)),
                None if index == last => template.append_message(MessageRole::Assistant, None),
                None => return Err(PromptError::PendingTurnNotLast { index }),
            }
        }

        Ok(template)
    }

    /// Append a message. Empty text is stored as pending.
    pub fn append_message(&mut self, role: MessageRole, text: Option<&str>) {
        self.messages.push(TemplateMessage {
            role,
            text: text.filter(|t| !t.is_empty()).map(str::to_string),
        });
    }

    /// Append topical knowledge to the system preamble. Empty knowledge is ignored.
    pub fn add_knowledge(&mut self, knowledge: Option<&str>) {
        if let Some(knowledge) = knowledge.filter(|k| !k.is_empty()) {
            self.system.push_str(KNOWLEDGE_PREFIX);
            self.system.push_str(knowledge);
            self.system.push('\n');
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn messages(&self) -> &[TemplateMessage] {
        &self.messages
    }

    pub fn separator(&self) -> &'static str {
        SEPARATOR
    }

    pub fn role_label(&self, role: MessageRole) -> &'static str {
        match role {
            MessageRole::Human => HUMAN_ROLE,
            MessageRole::Assistant => ASSISTANT_ROLE,
        }
    }

    /// Token that makes the backend stop before writing the next user turn.
    pub fn stop_token(&self) -> String {
        format!("{SEPARATOR}{HUMAN_ROLE}")
    }

    /// Render the flat prompt.
    pub fn render(&self) -> String {
        let mut prompt = format!("{}{SEPARATOR}", self.system);
        for message in &self.messages {
            let role = self.role_label(message.role);
            match &message.text {
                Some(text) => {
                    prompt.push_str(role);
                    prompt.push_str(": ");
                    prompt.push_str(text);
                    prompt.push_str(SEPARATOR);
                }
                None => {
                    prompt.push_str(role);
                    prompt.push(':');
                }
            }
        }
        prompt
    }

    /// Render the prompt sent to the backend.
    ///
    /// In continuation mode exactly one trailing separator is removed so the
    /// model extends the last message instead of starting a new one.
    pub fn prompt(&self, continued: bool) -> String {
        let mut prompt = self.render();
        if continued && prompt.ends_with(SEPARATOR) {
            prompt.truncate(prompt.len() - SEPARATOR.len());
        }
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = "Start a fun conversation.";

    fn complete_history() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::exchange("hi there", "hello! how are you?"),
            ConversationTurn::exchange("great, you?", "doing well"),
        ]
    }

    #[test]
    fn test_render_complete_history_in_order() {
        let template = ConversationTemplate::from_history(SYSTEM, &complete_history()).unwrap();
        let prompt = template.render();
        assert_eq!(
            prompt,
            "Start a fun conversation.</s>Human: hi there</s>Assistant: hello! how are you?</s>\
             Human: great, you?</s>Assistant: doing well</s>"
        );

        for text in ["hi there", "hello! how are you?", "great, you?", "doing well"] {
            assert_eq!(prompt.matches(text).count(), 1, "{text} should appear once");
        }
        let positions: Vec<usize> = ["hi there", "hello! how", "great, you?", "doing well"]
            .iter()
            .map(|t| prompt.find(t).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pending_turn_renders_placeholder_last() {
        let turns = vec![
            ConversationTurn::exchange("hi", "hey"),
            ConversationTurn::pending("tell me something"),
        ];
        let template = ConversationTemplate::from_history(SYSTEM, &turns).unwrap();
        let last = template.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert!(last.text.is_none());
        assert!(template.render().ends_with("</s>Human: tell me something</s>Assistant:"));
    }

    #[test]
    fn test_pending_turn_not_last_is_rejected() {
        let turns = vec![
            ConversationTurn::pending("hi"),
            ConversationTurn::exchange("anyone?", "yes"),
        ];
        let err = ConversationTemplate::from_history(SYSTEM, &turns).unwrap_err();
        assert!(matches!(err, PromptError::PendingTurnNotLast { index: 0 }));
    }

    #[test]
    fn test_empty_history_renders_system_only() {
        let template = ConversationTemplate::from_history(SYSTEM, &[]).unwrap();
        assert_eq!(template.render(), "Start a fun conversation.</s>");
    }

    #[test]
    fn test_turn_without_user_skips_human_message() {
        let turns = vec![ConversationTurn {
            user: None,
            bot: Some("Welcome back!".to_string()),
        }];
        let template = ConversationTemplate::from_history(SYSTEM, &turns).unwrap();
        assert_eq!(
            template.render(),
            "Start a fun conversation.</s>Assistant: Welcome back!</s>"
        );
    }

    #[test]
    fn test_continuation_strips_exactly_one_separator() {
        let template = ConversationTemplate::from_history(SYSTEM, &complete_history()).unwrap();
        let fresh = template.prompt(false);
        let continued = template.prompt(true);
        assert!(continued.ends_with("doing well"));
        assert_eq!(format!("{continued}{SEPARATOR}"), fresh);
    }

    #[test]
    fn test_continuation_leaves_pending_prompt_alone() {
        let turns = vec![ConversationTurn::pending("hi")];
        let template = ConversationTemplate::from_history(SYSTEM, &turns).unwrap();
        assert_eq!(template.prompt(true), template.prompt(false));
    }

    #[test]
    fn test_knowledge_appended_to_system() {
        let mut template =
            ConversationTemplate::from_history(SYSTEM, &[ConversationTurn::pending("hi")]).unwrap();
        template.add_knowledge(Some("Mars has two moons."));
        assert!(template.render().contains(
            "Here's some external knowledge you can use when making your response: Mars has two moons."
        ));
        assert_eq!(
            template.system(),
            "Start a fun conversation.\nHere's some external knowledge you can use when making your response: Mars has two moons.\n"
        );
    }

    #[test]
    fn test_missing_or_empty_knowledge_leaves_system_unchanged() {
        let mut template = ConversationTemplate::new(SYSTEM);
        template.add_knowledge(None);
        template.add_knowledge(Some(""));
        assert_eq!(template.system(), SYSTEM);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut template = ConversationTemplate::from_history(SYSTEM, &complete_history()).unwrap();
        template.add_knowledge(Some("facts"));
        assert_eq!(template.render(), template.render());
        assert_eq!(template.prompt(true), template.prompt(true));
    }

    #[test]
    fn test_stop_token() {
        let template = ConversationTemplate::new(SYSTEM);
        assert_eq!(template.stop_token(), "</s>Human");
    }
}
