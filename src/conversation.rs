//! Running dialogue between the user and the analyst model.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message. Serializes to the `{role, content}` shape chat APIs expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only list of turns, alternating user/assistant and starting with the user.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
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

    /// Append the user half of an exchange.
    /// The turn is withdrawn again unless the returned guard is committed with a reply.
    pub fn begin_exchange(&mut self, prompt: impl Into<String>) -> PendingExchange<'_> {
        let mark = self.turns.len();
        self.turns.push(Turn::user(prompt));
        PendingExchange {
            conversation: self,
            mark,
            committed: false,
        }
    }
}

/// Guard over a conversation whose last turn is an unanswered user prompt.
pub struct PendingExchange<'a> {
    conversation: &'a mut Conversation,
    mark: usize,
    committed: bool,
}

impl PendingExchange<'_> {
    /// Everything the model should see, including the pending prompt.
    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    /// Close the exchange with the assistant's reply.
    pub fn commit(mut self, reply: impl Into<String>) {
        self.conversation.turns.push(Turn::assistant(reply));
        self.committed = true;
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.conversation.turns.truncate(self.mark);
        }
    }
}
