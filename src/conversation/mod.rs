//! Chat history and its translation to and from agent messages.
//!
//! Front ends exchange history as a list of `[user, assistant]` pairs where
//! the assistant slot is `null` for the turn still waiting on a reply. A
//! `null` user slot marks a message the bot sent first, such as a greeting.
//! The agent loop works on a flat, role-tagged message list instead.

use serde::{Deserialize, Serialize};

use crate::types::ModelMessage;

/// One user/assistant exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(Option<String>, Option<String>)",
    into = "(Option<String>, Option<String>)"
)]
pub struct Turn {
    pub user: Option<String>,
    pub assistant: Option<String>,
}

impl Turn {
    /// A turn still waiting on its reply.
    pub fn pending(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            assistant: None,
        }
    }

    /// A bot-initiated message with no user text before it.
    pub fn greeting(assistant: impl Into<String>) -> Self {
        Self {
            user: None,
            assistant: Some(assistant.into()),
        }
    }

    /// A completed exchange.
    pub fn answered(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            assistant: Some(assistant.into()),
        }
    }
}

impl From<(Option<String>, Option<String>)> for Turn {
    fn from((user, assistant): (Option<String>, Option<String>)) -> Self {
        Self { user, assistant }
    }
}

impl From<Turn> for (Option<String>, Option<String>) {
    fn from(turn: Turn) -> Self {
        (turn.user, turn.assistant)
    }
}

/// Ordered conversation history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Flattened agent messages for this history.
    pub fn to_agent_messages(&self) -> impl Iterator<Item = ModelMessage> + Clone + '_ {
        to_agent_messages(&self.turns)
    }
}

impl From<Vec<Turn>> for History {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl FromIterator<Turn> for History {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

/// Flatten turns into user/assistant messages, preserving order. Empty slots
/// are skipped.
///
/// Lazy and restartable: clone the iterator to walk it again.
pub fn to_agent_messages(turns: &[Turn]) -> impl Iterator<Item = ModelMessage> + Clone + '_ {
    turns.iter().flat_map(|turn| {
        let user = turn.user.as_deref().map(|text| ModelMessage::user(text));
        let assistant = turn.assistant.as_deref().map(|text| ModelMessage::assistant(text));
        user.into_iter().chain(assistant)
    })
}

/// Text of the final agent message.
///
/// A message without any text part (a bare tool call, say) is rendered as
/// JSON instead. Returns `None` only when `messages` is empty.
pub fn from_agent_reply(messages: &[ModelMessage]) -> Option<String> {
    let last = messages.last()?;
    if last.has_text() {
        return Some(last.text());
    }
    Some(serde_json::to_string(last).unwrap_or_else(|_| format!("{last:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentToolCall, Role};
    use pretty_assertions::assert_eq;

    #[test]
    fn turn_serializes_as_pair() {
        let history: History = vec![
            Turn::answered("turn on led 1", "LED 1 is ON"),
            Turn::pending("and led 2?"),
        ]
        .into();
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["turn on led 1", "LED 1 is ON"], ["and led 2?", null]])
        );

        let back: History = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn iterator_is_restartable() {
        let turns = vec![Turn::answered("a", "b"), Turn::pending("c")];
        let messages = to_agent_messages(&turns);
        assert_eq!(messages.clone().count(), 3);
        let roles: Vec<Role> = messages.map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn reply_without_text_is_rendered_as_json() {
        let msg = ModelMessage::assistant_tool_calls(
            "",
            vec![AgentToolCall {
                id: "call_1".into(),
                name: "get_led_status".into(),
                arguments: serde_json::json!({}),
            }],
        );
        let reply = from_agent_reply(&[msg]).unwrap();
        assert!(reply.contains("get_led_status"));
    }

    #[test]
    fn greeting_turn_contributes_only_assistant_message() {
        let turns = vec![Turn::greeting("Hi, I'm Micky"), Turn::pending("turn on led 1")];
        let roles: Vec<Role> = to_agent_messages(&turns).map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User]);
    }

    #[test]
    fn empty_reply_is_none() {
        assert_eq!(from_agent_reply(&[]), None);
    }
}
