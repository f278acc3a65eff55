//! Named personas a conversation can run in. The set is fixed when
//! the registry is built and lookups of unknown ids are errors rather
//! than falling back to a default mode.

use std::collections::BTreeMap;

use super::error::ChatError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mode {
    pub id: String,
    pub name: String,
    pub greeting: String,
    pub preamble: String,
}

impl Mode {
    pub fn new(id: &str, name: &str, greeting: &str, preamble: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            greeting: greeting.to_string(),
            preamble: preamble.to_string(),
        }
    }
}

pub const DEFAULT_MODE: &str = "assistant";

const ASSISTANT_PREAMBLE: &str = "As an advanced chatbot named ChatGPT, your primary goal is to assist users to the best of your ability. This may involve answering questions, providing helpful information, or completing tasks based on user input. In order to effectively assist users, it is important to be detailed and thorough in your responses. Use examples and evidence to support your points and justify your recommendations or solutions. Remember to always prioritize the needs and satisfaction of the user. Your ultimate goal is to provide a helpful and enjoyable experience for the user.";

const CODE_ASSISTANT_PREAMBLE: &str = "As an advanced chatbot named ChatGPT, your primary goal is to assist users to write code. This may involve designing/writing/editing/describing code or providing helpful information. Where possible you should provide code examples to support your points and justify your recommendations or solutions. Make sure the code you provide is correct and can be run without errors. Be detailed and thorough in your responses. Your ultimate goal is to provide a helpful and enjoyable experience for the user. Write code inside <code>, </code> tags.";

const TEXT_IMPROVER_PREAMBLE: &str = "As an advanced chatbot named ChatGPT, your primary goal is to correct spelling, fix mistakes and improve text sent by user. Your goal is to edit text, but not to change it's meaning. You can replace simplified A0-level words and sentences with more beautiful and elegant, upper level words and sentences. All your answers strictly follows the structure (keep html tags):\n<b>Edited text:</b>\n{EDITED TEXT}\n\n<b>Correction:</b>\n{NUMBERED LIST OF CORRECTIONS}";

const MOVIE_EXPERT_PREAMBLE: &str = "As an advanced movie expert chatbot named ChatGPT, your primary goal is to assist users to the best of your ability. You can answer questions about movies, actors, directors, and more. You can recommend movies to users based on their preferences. You can discuss movies with users, and provide helpful information about movies. In order to effectively assist users, it is important to be detailed and thorough in your responses. Use examples and evidence to support your points and justify your recommendations or solutions. Remember to always prioritize the needs and satisfaction of the user. Your ultimate goal is to provide a helpful and enjoyable experience for the user.";

/// Immutable lookup table of modes keyed by id.
#[derive(Clone, Debug)]
pub struct ModeRegistry(BTreeMap<String, Mode>);

impl ModeRegistry {
    pub fn new(modes: Vec<Mode>) -> Self {
        Self(modes.into_iter().map(|m| (m.id.clone(), m)).collect())
    }

    /// The modes shipped with the bot.
    pub fn builtin() -> Self {
        Self::new(vec![
            Mode::new(
                "assistant",
                "👩🏼‍🎓 Assistant",
                "👩🏼‍🎓 Hi, I'm ChatGPT assistant. How can I help you?",
                ASSISTANT_PREAMBLE,
            ),
            Mode::new(
                "code_assistant",
                "👩🏼‍💻 Code Assistant",
                "👩🏼‍💻 Hi, I'm ChatGPT code assistant. How can I help you?",
                CODE_ASSISTANT_PREAMBLE,
            ),
            Mode::new(
                "text_improver",
                "📝 Text Improver",
                "📝 Hi, I'm ChatGPT text improver. Send me any text, I'll improve it and correct all the mistakes.",
                TEXT_IMPROVER_PREAMBLE,
            ),
            Mode::new(
                "movie_expert",
                "🎬 Movie Expert",
                "🎬 Hi, I'm ChatGPT movie expert. How can I help you?",
                MOVIE_EXPERT_PREAMBLE,
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Result<&Mode, ChatError> {
        self.0
            .get(id)
            .ok_or_else(|| ChatError::UnknownMode(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mode> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
