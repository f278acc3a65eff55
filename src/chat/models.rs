//! The core models for a conversation with an LLM.
use serde::{Deserialize, Serialize};

/// One exchange between the user and the bot.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Turn {
    pub user: String,
    pub bot: String,
}

impl Turn {
    pub fn new(user: &str, bot: &str) -> Self {
        Self {
            user: user.to_string(),
            bot: bot.to_string(),
        }
    }
}

/// Prior turns of a conversation, oldest first. Turns are only ever
/// appended at the end or dropped from the front.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct History(Vec<Turn>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_turns(turns: Vec<Turn>) -> Self {
        Self(turns)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn)
    }

    /// Forgets the `n` oldest turns, e.g. the ones a completion had to
    /// drop to fit the context window.
    pub fn drop_oldest(&mut self, n: usize) {
        let n = n.min(self.0.len());
        self.0.drain(..n);
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }
}

/// The outcome of a successful completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub answer: String,
    pub total_tokens: u64,
    /// Number of oldest history turns left out so the request fit.
    pub turns_dropped: usize,
}
