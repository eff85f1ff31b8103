use std::env;

use crate::ai::config::GeminiConfig;

#[derive(Clone)]
pub struct Config {
    pub bind_addr: String,
    pub ai: Option<GeminiConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let ai = GeminiConfig::from_env();
        Self { bind_addr, ai }
    }
}
