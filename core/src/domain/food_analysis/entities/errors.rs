use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Analysis request failed: {0}")]
    RequestFailed(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("No JSON object found in model response")]
    NoJsonFound,

    #[error("Malformed JSON in model response: {0}")]
    MalformedJson(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageInputError {
    #[error("Image is empty")]
    Empty,

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}
