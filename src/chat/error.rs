use thiserror::Error;

use crate::openai::ApiError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat mode {0} is not supported")]
    UnknownMode(String),

    /// History was shrunk to nothing and the preamble plus the new
    /// message still does not fit in the model's context window.
    #[error("History is reduced to zero turns, but the request still has too many tokens")]
    FatalOverflow(#[source] ApiError),

    #[error("Failed to render prompt: {0}")]
    Prompt(#[from] handlebars::RenderError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
