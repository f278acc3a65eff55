use std::env;

use crate::chat::PromptStyle;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub chat_model: String,
    pub legacy_model: String,
    pub prompt_style: PromptStyle,
}

impl AppConfig {
    /// The model identifier sent with requests of the configured
    /// prompt style.
    pub fn model(&self) -> &str {
        match self.prompt_style {
            PromptStyle::Chat => &self.chat_model,
            PromptStyle::Legacy => &self.legacy_model,
        }
    }
}

fn flag_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname = env::var("CHATMODE_API_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let chat_model =
            env::var("CHATMODE_CHAT_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let legacy_model =
            env::var("CHATMODE_LEGACY_MODEL").unwrap_or_else(|_| "text-davinci-003".to_string());
        let prompt_style = match env::var("CHATMODE_LEGACY") {
            Ok(v) if flag_enabled(&v) => PromptStyle::Legacy,
            _ => PromptStyle::Chat,
        };

        Self {
            openai_api_hostname,
            openai_api_key,
            chat_model,
            legacy_model,
            prompt_style,
        }
    }
}
