use uplan_core::{SubmissionId, SubmissionOutcome};

/// Settlement of one submission, delivered exactly once per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub submission_id: SubmissionId,
    pub outcome: SubmissionOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid service URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    Build(String),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
