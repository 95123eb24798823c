use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyAssistantError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(feature = "gemini")]
impl From<reqwest::Error> for StudyAssistantError {
    fn from(err: reqwest::Error) -> Self {
        StudyAssistantError::GenerationFailed(err.without_url().to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudyAssistantError>;
