//! Builds the request payload for a turn in one of the two shapes an
//! OpenAI compatible API accepts. The legacy prompt is rendered with
//! Handlebars in strict mode and without HTML escaping since user
//! text is sent to the model verbatim.

use handlebars::{Handlebars, no_escape};
use serde_json::json;

use super::models::Turn;
use super::modes::Mode;
use crate::openai::{Message, Payload, Role};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// Role tagged messages for the chat completions endpoint.
    #[default]
    Chat,
    /// One flattened text prompt for the legacy completions endpoint.
    Legacy,
}

const LEGACY_PROMPT_NAME: &str = "LegacyPrompt";

const LEGACY_PROMPT: &str = "{{preamble}}\n\n{{#each turns}}User: {{user}}\nAssistant: {{bot}}\n{{/each}}User: {{message}}\nAssistant: ";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(no_escape);
    registry
        .register_template_string(LEGACY_PROMPT_NAME, LEGACY_PROMPT)
        .expect("Failed to register template");
    registry
}

pub struct PromptBuilder {
    templates: Handlebars<'static>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            templates: templates(),
        }
    }

    pub fn build(
        &self,
        style: PromptStyle,
        mode: &Mode,
        turns: &[Turn],
        message: &str,
    ) -> Result<Payload, handlebars::RenderError> {
        match style {
            PromptStyle::Chat => Ok(Payload::Chat(chat_messages(mode, turns, message))),
            PromptStyle::Legacy => self.legacy_prompt(mode, turns, message).map(Payload::Legacy),
        }
    }

    fn legacy_prompt(
        &self,
        mode: &Mode,
        turns: &[Turn],
        message: &str,
    ) -> Result<String, handlebars::RenderError> {
        self.templates.render(
            LEGACY_PROMPT_NAME,
            &json!({
                "preamble": mode.preamble,
                "turns": turns,
                "message": message,
            }),
        )
    }
}

fn chat_messages(mode: &Mode, turns: &[Turn], message: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(turns.len() * 2 + 2);
    messages.push(Message::new(Role::System, &mode.preamble));
    for turn in turns {
        messages.push(Message::new(Role::User, &turn.user));
        messages.push(Message::new(Role::Assistant, &turn.bot));
    }
    messages.push(Message::new(Role::User, message));
    messages
}
