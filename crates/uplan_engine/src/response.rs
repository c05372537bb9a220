use serde::Deserialize;
use serde_json::Value;
use uplan_core::{FeedResponse, SubmissionOutcome};

pub const RATE_LIMIT_STATUS: u16 = 429;

#[derive(Debug, Deserialize)]
struct FeedBody {
    url: String,
    courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Map a complete HTTP response of `/create` onto a submission outcome.
///
/// 429 is recognised before the body is looked at. Other failures take
/// their message from `detail` when the body carries one.
pub fn interpret_response(status: u16, body: &[u8]) -> SubmissionOutcome {
    if (200..300).contains(&status) {
        return match serde_json::from_slice::<FeedBody>(body) {
            Ok(FeedBody { url, courses }) => SubmissionOutcome::Success(FeedResponse { url, courses }),
            Err(err) => SubmissionOutcome::TransportFailure {
                message: format!("invalid feed response: {err}"),
            },
        };
    }
    if status == RATE_LIMIT_STATUS {
        return SubmissionOutcome::RateLimited;
    }
    SubmissionOutcome::ServerRejected {
        status,
        detail: parse_detail(body),
    }
}

fn parse_detail(body: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(body).ok()?;
    match body.detail? {
        Value::String(detail) if !detail.is_empty() => Some(detail),
        // Validation errors arrive as a list of `{ "msg": ... }` objects.
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.as_str()),
                    Value::Object(fields) => fields.get("msg").and_then(Value::as_str),
                    _ => None,
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_body_is_decoded() {
        let outcome = interpret_response(
            200,
            br#"{"url":"https://x/cal.ics","courses":["051011"]}"#,
        );
        assert_eq!(
            outcome,
            SubmissionOutcome::Success(FeedResponse {
                url: "https://x/cal.ics".to_string(),
                courses: vec!["051011".to_string()],
            })
        );
    }

    #[test]
    fn undecodable_success_body_is_transport_failure() {
        let outcome = interpret_response(200, b"<html>oops</html>");
        assert!(matches!(
            outcome,
            SubmissionOutcome::TransportFailure { message } if message.starts_with("invalid feed response")
        ));
    }

    #[test]
    fn rate_limit_ignores_body() {
        assert_eq!(
            interpret_response(429, br#"{"detail":"slow down"}"#),
            SubmissionOutcome::RateLimited
        );
        assert_eq!(interpret_response(429, b""), SubmissionOutcome::RateLimited);
    }

    #[test]
    fn string_detail_is_used() {
        assert_eq!(
            interpret_response(404, br#"{"detail":"unknown course"}"#),
            SubmissionOutcome::ServerRejected {
                status: 404,
                detail: Some("unknown course".to_string()),
            }
        );
    }

    #[test]
    fn validation_error_list_is_joined() {
        let body = br#"{"detail":[{"loc":["query","courses"],"msg":"Field required","type":"missing"},{"msg":"second"}]}"#;
        assert_eq!(
            interpret_response(422, body),
            SubmissionOutcome::ServerRejected {
                status: 422,
                detail: Some("Field required; second".to_string()),
            }
        );
    }

    #[test]
    fn missing_or_unusable_detail_is_none() {
        let bodies: [&[u8]; 5] = [
            b"",
            b"{}",
            b"not json",
            br#"{"detail":""}"#,
            br#"{"detail":7}"#,
        ];
        for body in bodies {
            assert_eq!(
                interpret_response(500, body),
                SubmissionOutcome::ServerRejected {
                    status: 500,
                    detail: None,
                }
            );
        }
    }
}
