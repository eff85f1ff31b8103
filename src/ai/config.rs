use std::env;

/// Generation settings passed with every call. Fixed at build time; there is
/// no per-request tuning surface.
pub const TEMPERATURE: f64 = 0.3;
pub const MAX_OUTPUT_TOKENS: u32 = 4096;

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: Option<String>,
}

impl GeminiConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(k) => k,
            Err(_) => return None,
        };
        Some(Self {
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            api_url: env::var("GEMINI_API_URL").ok(),
        })
    }
}
