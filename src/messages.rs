//! User-facing strings returned by the service.
//!
//! Keep every displayable string in this module so warnings, error prefixes
//! and confirmations stay in one place and are easy to update.

/// Preset form choices. An "Other" selection arrives as free text and is
/// stored as-is.
pub const VEHICLE_TYPE_OPTIONS: [&str; 3] = ["Car", "Bike", "Electric Vehicle"];
pub const PURPOSE_OPTIONS: [&str; 3] =
    ["Buying Decision", "Maintenance Tips", "Eco-Friendly Search"];

/// Sentinels reported when a session never committed a context.
pub const DEFAULT_VEHICLE_TYPE: &str = "Not Specified";
pub const DEFAULT_PURPOSE: &str = "General Analysis";

pub const CONTEXT_APPLIED: &str = "Changes applied successfully";

// One validation warning per missing input, per mode.
pub const MISSING_QUERY_TEXT_MODE: &str = "Please provide vehicle details to proceed.";
pub const MISSING_IMAGE_VISION_MODE: &str = "Please provide a vehicle image for processing.";
pub const MISSING_IMAGE_FUSION_MODE: &str = "Please upload an Image";
pub const MISSING_QUERY_FUSION_MODE: &str = "Please Enter Your Vehicle Query";
pub const UNSUPPORTED_IMAGE_TYPE: &str =
    "Unsupported image type. Please upload a JPEG or PNG image.";

// Prefixes for remote-call failures, one per analysis mode.
pub const TEXT_ERROR_PREFIX: &str = "Error Generating Response ";
pub const VISION_ERROR_PREFIX: &str = "Error Generating Content: ";
pub const FUSION_ERROR_PREFIX: &str = "AI Generation Error: ";

pub const ANALYSIS_DISABLED: &str = "AI analysis is disabled.";
