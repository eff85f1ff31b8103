//! Analysis request validation and dispatch.
//!
//! Each user action maps to exactly one request variant. Validation runs
//! before any prompt is built; a rejected request never reaches the remote
//! model. Remote failures are converted to displayable messages at this
//! boundary and never propagate as errors.

use tracing::{instrument, warn};

use crate::ai::gemini::{GeminiClient, ImagePayload};
use crate::messages;
use crate::prompts;
use crate::session::ResolvedContext;

pub const SUPPORTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// One analysis action, tagged by mode. Immutable once built.
pub enum AnalysisRequest {
    TextOnly { query: String },
    ImageOnly { image: ImagePayload },
    TextAndImage { query: String, image: ImagePayload },
}

/// Terminal state of one analysis action.
#[derive(Debug, PartialEq)]
pub enum AnalysisOutcome {
    /// Generated report text, passed through untouched.
    Success { text: String },
    /// Required input missing; nothing was dispatched.
    Rejected { warning: &'static str },
    /// Remote call failed; the message is displayable as-is.
    Failure { message: String },
}

impl AnalysisRequest {
    /// Check the mode's required inputs. Returns the user-visible warning
    /// when the request must not be dispatched.
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            AnalysisRequest::TextOnly { query } => {
                if query.trim().is_empty() {
                    return Err(messages::MISSING_QUERY_TEXT_MODE);
                }
            }
            AnalysisRequest::ImageOnly { image } => {
                if image.data.is_empty() {
                    return Err(messages::MISSING_IMAGE_VISION_MODE);
                }
                check_image_type(image)?;
            }
            AnalysisRequest::TextAndImage { query, image } => {
                // Image is checked before the query.
                if image.data.is_empty() {
                    return Err(messages::MISSING_IMAGE_FUSION_MODE);
                }
                check_image_type(image)?;
                if query.trim().is_empty() {
                    return Err(messages::MISSING_QUERY_FUSION_MODE);
                }
            }
        }
        Ok(())
    }

    fn mode(&self) -> &'static str {
        match self {
            AnalysisRequest::TextOnly { .. } => "text",
            AnalysisRequest::ImageOnly { .. } => "vision",
            AnalysisRequest::TextAndImage { .. } => "fusion",
        }
    }
}

fn check_image_type(image: &ImagePayload) -> Result<(), &'static str> {
    if SUPPORTED_IMAGE_TYPES.contains(&image.mime_type.as_str()) {
        Ok(())
    } else {
        Err(messages::UNSUPPORTED_IMAGE_TYPE)
    }
}

pub struct Analyzer {
    client: GeminiClient,
}

impl Analyzer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Run one analysis action: validate, build the mode's prompt, dispatch.
    /// Single attempt, no retry.
    #[instrument(level = "debug", skip_all, fields(mode = request.mode()))]
    pub async fn analyze(
        &self,
        context: &ResolvedContext,
        request: AnalysisRequest,
    ) -> AnalysisOutcome {
        if let Err(warning) = request.validate() {
            return AnalysisOutcome::Rejected { warning };
        }

        match request {
            AnalysisRequest::TextOnly { query } => {
                let prompt = prompts::build_text_prompt(context, &query);
                match self.client.generate_text(&prompt).await {
                    Ok(text) => AnalysisOutcome::Success { text },
                    Err(err) => {
                        warn!(error = %err, "text analysis failed");
                        AnalysisOutcome::Failure {
                            message: format!("{}{err}", messages::TEXT_ERROR_PREFIX),
                        }
                    }
                }
            }
            AnalysisRequest::ImageOnly { image } => {
                let prompt = prompts::build_image_prompt();
                match self.client.generate_multimodal(prompt, &image).await {
                    Ok(text) => AnalysisOutcome::Success { text },
                    Err(err) => {
                        warn!(error = %err, "vision analysis failed");
                        AnalysisOutcome::Failure {
                            message: format!("{}{err}", messages::VISION_ERROR_PREFIX),
                        }
                    }
                }
            }
            AnalysisRequest::TextAndImage { query, image } => {
                let prompt = prompts::build_fusion_prompt(context, &query);
                match self.client.generate_multimodal(&prompt, &image).await {
                    Ok(text) => AnalysisOutcome::Success { text },
                    Err(err) => {
                        warn!(error = %err, "fusion analysis failed");
                        AnalysisOutcome::Failure {
                            message: format!("{}{err}", messages::FUSION_ERROR_PREFIX),
                        }
                    }
                }
            }
        }
    }
}
