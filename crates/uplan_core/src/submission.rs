use crate::Locale;

pub type SubmissionId = u64;

/// Normalized query for the feed service. Built only through
/// [`SubmissionRequest::from_raw`], so neither field contains whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    courses: String,
    semester: String,
}

impl SubmissionRequest {
    pub fn from_raw(courses: &str, semester: &str) -> Self {
        Self {
            courses: normalize_field(courses),
            semester: normalize_field(semester),
        }
    }

    /// Comma-separated course identifiers, passed through unvalidated.
    pub fn courses(&self) -> &str {
        &self.courses
    }

    pub fn semester(&self) -> &str {
        &self.semester
    }
}

/// Remove every whitespace character, interior ones included.
pub fn normalize_field(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Success payload of the feed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub url: String,
    pub courses: Vec<String>,
}

/// How one submission ended. Exactly one per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(FeedResponse),
    /// HTTP 429; the body is ignored.
    RateLimited,
    /// Any other non-2xx status.
    ServerRejected { status: u16, detail: Option<String> },
    /// No usable response: connection errors, unreadable or undecodable bodies.
    TransportFailure { message: String },
}

impl SubmissionOutcome {
    pub fn kind_label(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success(_) => "success",
            SubmissionOutcome::RateLimited => "rate-limited",
            SubmissionOutcome::ServerRejected { .. } => "server-rejected",
            SubmissionOutcome::TransportFailure { .. } => "transport-failure",
        }
    }
}

/// User-facing result, resolved against the locale active at settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { url: String, courses: Vec<String> },
    Failure { message: String },
}

impl SubmissionResult {
    pub fn from_outcome(outcome: SubmissionOutcome, locale: Locale) -> Self {
        match outcome {
            SubmissionOutcome::Success(FeedResponse { url, courses }) => {
                SubmissionResult::Success { url, courses }
            }
            SubmissionOutcome::RateLimited => SubmissionResult::Failure {
                message: locale.translations().rate_limit_message.to_string(),
            },
            SubmissionOutcome::ServerRejected { status, detail } => SubmissionResult::Failure {
                message: detail
                    .filter(|detail| !detail.is_empty())
                    .unwrap_or_else(|| format!("HTTP {status}")),
            },
            SubmissionOutcome::TransportFailure { message } => {
                SubmissionResult::Failure { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_interior_and_unicode_whitespace() {
        assert_eq!(normalize_field(" 051011 ,\t051012-3\n"), "051011,051012-3");
        assert_eq!(normalize_field("2024\u{00A0}W"), "2024W");
        assert_eq!(normalize_field("   "), "");
    }

    #[test]
    fn request_normalizes_both_fields() {
        let request = SubmissionRequest::from_raw("05 10 11", " 2024 W ");
        assert_eq!(request.courses(), "051011");
        assert_eq!(request.semester(), "2024W");
    }

    #[test]
    fn server_rejection_prefers_detail() {
        let result = SubmissionResult::from_outcome(
            SubmissionOutcome::ServerRejected {
                status: 404,
                detail: Some("unknown course".to_string()),
            },
            Locale::En,
        );
        assert_eq!(
            result,
            SubmissionResult::Failure {
                message: "unknown course".to_string()
            }
        );
    }

    #[test]
    fn server_rejection_without_detail_names_status() {
        let result = SubmissionResult::from_outcome(
            SubmissionOutcome::ServerRejected {
                status: 500,
                detail: None,
            },
            Locale::De,
        );
        assert_eq!(
            result,
            SubmissionResult::Failure {
                message: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn rate_limit_uses_given_locale() {
        let result = SubmissionResult::from_outcome(SubmissionOutcome::RateLimited, Locale::En);
        assert_eq!(
            result,
            SubmissionResult::Failure {
                message: Locale::En.translations().rate_limit_message.to_string()
            }
        );
    }
}
