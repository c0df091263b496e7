//! Wire types for the AI-chat collaborator boundary.
//!
//! The network client itself lives outside this crate; these types define
//! the conversation shape it exchanges (`role` plus `parts: [{text}]`) and
//! the prompt assembly for lesson selection.

use crate::curriculum::Lesson;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::User,
            parts: vec![MessagePart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Model,
            parts: vec![MessagePart { text: text.into() }],
        }
    }

    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Conversation history handed to the AI collaborator on each exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    pub messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::model(text));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The user-turn prompt sent when a lesson or project step is selected.
pub fn lesson_prompt(lesson: &Lesson) -> String {
    format!("[{}] {}", lesson.title, lesson.prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::Priority;

    #[test]
    fn wire_shape_matches_contract() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["parts"][0]["text"], "hello");
    }

    #[test]
    fn lesson_prompt_carries_title_and_stored_prompt() {
        let lesson = Lesson {
            id: "l1".to_string(),
            title: "Loops".to_string(),
            prompt: "Teach me loops".to_string(),
            completed: false,
            priority: Priority::None,
        };
        assert_eq!(lesson_prompt(&lesson), "[Loops] Teach me loops");
    }
}
