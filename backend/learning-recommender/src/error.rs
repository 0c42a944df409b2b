use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommenderError>;

#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("Topic '{topic}' references unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite { topic: String, prerequisite: String },

    #[error("Topic declared more than once: {0}")]
    DuplicateTopic(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RecommenderError {
    fn from(err: serde_json::Error) -> Self {
        RecommenderError::Serialization(err.to_string())
    }
}

// Transport failures, timeouts, and non-2xx replies all mean the backend
// could not produce an answer.
impl From<reqwest::Error> for RecommenderError {
    fn from(err: reqwest::Error) -> Self {
        RecommenderError::ServiceUnavailable(err.to_string())
    }
}
