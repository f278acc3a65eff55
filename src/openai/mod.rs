pub mod client;
pub mod core;
pub mod error;

pub use client::{CompletionApi, OpenAiClient};
pub use self::core::{
    CompletionOptions, CompletionRequest, CompletionResponse, Message, Payload, Role,
};
pub use error::ApiError;
