pub mod core;
pub mod error;
pub mod models;
pub mod modes;
pub mod prompt;

pub use self::core::{Adapter, AdapterBuilder};
pub use error::ChatError;
pub use models::{Completion, History, Turn};
pub use modes::{Mode, ModeRegistry};
pub use prompt::PromptStyle;
