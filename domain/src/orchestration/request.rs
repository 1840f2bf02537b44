//! Provider-neutral request built from the transcript

use crate::conversation::message::ChatMessage;
use crate::conversation::transcript::Transcript;
use crate::conversation::turn::Turn;
use crate::orchestration::participants::Slot;
use serde::{Deserialize, Serialize};

/// One `converse` call: prior history, the newest prompt, and an optional
/// system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverseRequest {
    pub history: Vec<ChatMessage>,
    pub prompt: String,
    pub system_instruction: Option<String>,
}

impl ConverseRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            history: Vec::new(),
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Build a request for `speaker` from the transcript.
    ///
    /// Everything but the newest turn becomes history; the newest turn's
    /// text is the prompt. Turns spoken by `speaker` are its own prior
    /// replies (assistant); every other turn reaches it as user input.
    /// Returns `None` for an empty transcript.
    pub fn for_speaker(transcript: &Transcript, speaker: Slot) -> Option<Self> {
        let (newest, context) = transcript.split_last()?;
        let history = context
            .iter()
            .map(|turn| history_message(turn, speaker))
            .collect();
        Some(Self::new(newest.text()).with_history(history))
    }

    /// Split an already role-tagged message list into history and prompt.
    /// The last message is the prompt. Returns `None` when empty.
    pub fn from_messages(mut messages: Vec<ChatMessage>) -> Option<Self> {
        let last = messages.pop()?;
        Some(Self::new(last.content).with_history(messages))
    }
}

fn history_message(turn: &Turn, speaker: Slot) -> ChatMessage {
    if turn.slot() == Some(speaker) {
        ChatMessage::assistant(turn.text())
    } else {
        ChatMessage::user(turn.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::message::MessageRole;
    use crate::core::provider::ProviderKind;

    fn debate() -> Transcript {
        vec![
            Turn::user("Topic?").unwrap(),
            Turn::from_slot(Slot::A, ProviderKind::Gpt, "claim a"),
            Turn::from_slot(Slot::B, ProviderKind::Gemini, "claim b"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_single_user_turn_has_empty_history() {
        let transcript: Transcript = vec![Turn::user("Topic?").unwrap()].into_iter().collect();
        let request = ConverseRequest::for_speaker(&transcript, Slot::A).unwrap();
        assert!(request.history.is_empty());
        assert_eq!(request.prompt, "Topic?");
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn test_history_is_perspective_of_speaker() {
        let request = ConverseRequest::for_speaker(&debate(), Slot::A).unwrap();
        assert_eq!(request.prompt, "claim b");
        let roles: Vec<_> = request.history.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[test]
    fn test_opponent_turns_are_user_input() {
        let mut transcript = debate();
        transcript.push(Turn::from_slot(Slot::A, ProviderKind::Gpt, "claim a2"));
        let request = ConverseRequest::for_speaker(&transcript, Slot::B).unwrap();
        let roles: Vec<_> = request.history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(request.prompt, "claim a2");
    }

    #[test]
    fn test_empty_transcript() {
        assert!(ConverseRequest::for_speaker(&Transcript::new(), Slot::A).is_none());
        assert!(ConverseRequest::from_messages(vec![]).is_none());
    }

    #[test]
    fn test_from_messages_splits_last() {
        let request = ConverseRequest::from_messages(vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("again"),
        ])
        .unwrap();
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.prompt, "again");
    }
}
