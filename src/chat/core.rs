use super::error::ChatError;
use super::models::{Completion, Turn};
use super::modes::ModeRegistry;
use super::prompt::{PromptBuilder, PromptStyle};
use crate::core::AppConfig;
use crate::openai::{ApiError, CompletionApi, CompletionOptions, CompletionRequest, OpenAiClient};

/// Formats a conversation for a completion API and recovers from
/// context window overflows by forgetting the oldest turns.
///
/// Every call to `complete` works on its own view of the history so
/// an `Adapter` can be shared between conversations. The caller
/// decides whether to forget the turns reported in
/// `Completion::turns_dropped`.
///
/// Use `Adapter::builder()` to construct an `Adapter`.
pub struct Adapter<C> {
    client: C,
    model: String,
    style: PromptStyle,
    options: CompletionOptions,
    modes: ModeRegistry,
    prompts: PromptBuilder,
}

impl Adapter<OpenAiClient> {
    pub fn from_config(config: &AppConfig) -> Self {
        AdapterBuilder::new(OpenAiClient::from_config(config), config.model())
            .style(config.prompt_style)
            .build()
    }
}

impl<C: CompletionApi> Adapter<C> {
    pub fn builder(client: C, model: &str) -> AdapterBuilder<C> {
        AdapterBuilder::new(client, model)
    }

    pub fn modes(&self) -> &ModeRegistry {
        &self.modes
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    /// Answers `message` in the given mode with `history` as context.
    ///
    /// When the API reports that the request is too large, the oldest
    /// remaining turn is left out and the request is rebuilt and sent
    /// again. This makes at most `history.len() + 1` requests before
    /// giving up with `ChatError::FatalOverflow`. Any other API error
    /// is returned as is.
    pub async fn complete(
        &self,
        message: &str,
        history: &[Turn],
        mode: &str,
    ) -> Result<Completion, ChatError> {
        let mode = self.modes.get(mode)?;
        let mut turns = history;

        loop {
            let payload = self.prompts.build(self.style, mode, turns, message)?;
            let request = CompletionRequest::new(&self.model, payload, self.options);

            tracing::debug!(
                "Requesting completion: mode={} style={:?} turns={}",
                mode.id,
                self.style,
                turns.len()
            );

            match self.client.submit(&request).await {
                Ok(resp) => {
                    let turns_dropped = history.len() - turns.len();
                    tracing::debug!(
                        "Completion used {} tokens, dropped {} turns",
                        resp.total_tokens,
                        turns_dropped
                    );
                    return Ok(Completion {
                        answer: resp.text.trim().to_string(),
                        total_tokens: resp.total_tokens,
                        turns_dropped,
                    });
                }
                Err(err @ ApiError::ContextOverflow(_)) => match turns.split_first() {
                    Some((_, rest)) => {
                        tracing::warn!(
                            "Context overflow with {} turns, dropping the oldest turn",
                            turns.len()
                        );
                        turns = rest;
                    }
                    None => {
                        tracing::error!("Context overflow with no history left: {}", err);
                        return Err(ChatError::FatalOverflow(err));
                    }
                },
                Err(err) => return Err(err.into()),
            }
        }
    }
}

pub struct AdapterBuilder<C> {
    client: C,
    model: String,
    style: PromptStyle,
    options: CompletionOptions,
    modes: ModeRegistry,
}

impl<C: CompletionApi> AdapterBuilder<C> {
    pub fn new(client: C, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            style: PromptStyle::default(),
            options: CompletionOptions::default(),
            modes: ModeRegistry::builtin(),
        }
    }

    pub fn build(self) -> Adapter<C> {
        Adapter {
            client: self.client,
            model: self.model,
            style: self.style,
            options: self.options,
            modes: self.modes,
            prompts: PromptBuilder::new(),
        }
    }

    pub fn style(mut self, style: PromptStyle) -> Self {
        self.style = style;
        self
    }

    pub fn options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn modes(mut self, modes: ModeRegistry) -> Self {
        self.modes = modes;
        self
    }
}
