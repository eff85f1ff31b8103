pub mod config;
pub mod gemini;

pub use config::GeminiConfig;
pub use gemini::{GeminiClient, ImagePayload};
