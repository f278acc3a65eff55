use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ApiError;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Sampling parameters sent unchanged with every request.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// The two request shapes understood by OpenAI compatible APIs.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Role tagged messages for `/v1/chat/completions`.
    Chat(Vec<Message>),
    /// A single flattened prompt for the legacy `/v1/completions`.
    Legacy(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub payload: Payload,
    pub options: CompletionOptions,
}

impl CompletionRequest {
    pub fn new(model: &str, payload: Payload, options: CompletionOptions) -> Self {
        Self {
            model: model.to_string(),
            payload,
            options,
        }
    }

    /// Path of the endpoint this request is sent to, relative to the
    /// API hostname.
    pub fn endpoint(&self) -> &'static str {
        match self.payload {
            Payload::Chat(_) => "/v1/chat/completions",
            Payload::Legacy(_) => "/v1/completions",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "model": self.model,
            "temperature": self.options.temperature,
            "max_tokens": self.options.max_tokens,
            "top_p": self.options.top_p,
            "frequency_penalty": self.options.frequency_penalty,
            "presence_penalty": self.options.presence_penalty,
        });
        match &self.payload {
            Payload::Chat(messages) => body["messages"] = json!(messages),
            Payload::Legacy(prompt) => body["prompt"] = json!(prompt),
        }
        body
    }
}

/// What the adapter needs from a successful completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionResponse {
    pub text: String,
    pub total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

// {
//     "id": "chatcmpl-123",
//     "object": "chat.completion",
//     "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}}],
//     "usage": {"prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11}
// }
#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    choices: Vec<ChatChoice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct TextChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TextCompletionBody {
    choices: Vec<TextChoice>,
    usage: Usage,
}

impl CompletionResponse {
    /// Parses a successful response body for the endpoint `payload`
    /// was sent to.
    pub fn parse(payload: &Payload, body: &str) -> Result<Self, ApiError> {
        match payload {
            Payload::Chat(_) => {
                let resp: ChatCompletionBody =
                    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
                let choice = resp
                    .choices
                    .into_iter()
                    .next()
                    .ok_or_else(|| ApiError::Decode(String::from("missing choices")))?;
                let text = choice
                    .message
                    .content
                    .ok_or_else(|| ApiError::Decode(String::from("missing message content")))?;
                Ok(Self {
                    text,
                    total_tokens: resp.usage.total_tokens,
                })
            }
            Payload::Legacy(_) => {
                let resp: TextCompletionBody =
                    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
                let choice = resp
                    .choices
                    .into_iter()
                    .next()
                    .ok_or_else(|| ApiError::Decode(String::from("missing choices")))?;
                Ok(Self {
                    text: choice.text,
                    total_tokens: resp.usage.total_tokens,
                })
            }
        }
    }
}
