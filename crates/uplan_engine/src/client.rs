use std::time::Duration;

use futures_util::StreamExt;
use uplan_core::{SubmissionOutcome, SubmissionRequest};
use uplan_logging::{uplan_debug, uplan_warn};
use url::Url;

use crate::response::{interpret_response, RATE_LIMIT_STATUS};
use crate::ClientError;

pub const CREATE_PATH: &str = "create";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the feed service; `create` is resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` waits for the response indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: u64,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_body_bytes: 1024 * 1024,
            user_agent: format!("uplan/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// The feed-generation service behind `GET /create`.
#[async_trait::async_trait]
pub trait FeedService: Send + Sync {
    /// Issue one request and classify its result. Never retries.
    async fn create_feed(&self, request: &SubmissionRequest) -> SubmissionOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestFeedClient {
    client: reqwest::Client,
    create_url: Url,
    max_body_bytes: u64,
}

impl ReqwestFeedClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let create_url = create_endpoint(&settings.base_url)?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .user_agent(settings.user_agent.as_str());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;

        Ok(Self {
            client,
            create_url,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    /// Full request URL with both query parameters, always present.
    pub fn request_url(&self, request: &SubmissionRequest) -> Url {
        let mut url = self.create_url.clone();
        url.query_pairs_mut()
            .append_pair("courses", request.courses())
            .append_pair("semester", request.semester());
        url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SubmissionOutcome> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(too_large(self.max_body_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_body_bytes {
                return Err(too_large(self.max_body_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl FeedService for ReqwestFeedClient {
    async fn create_feed(&self, request: &SubmissionRequest) -> SubmissionOutcome {
        let url = self.request_url(request);
        uplan_debug!("GET {}", url);

        let response = match self.client.get(url.as_str()).send().await {
            Ok(response) => response,
            Err(err) => return map_reqwest_error(err),
        };

        let status = response.status().as_u16();
        if status == RATE_LIMIT_STATUS {
            uplan_debug!("Response status={} (body not read)", status);
            return SubmissionOutcome::RateLimited;
        }
        let success = response.status().is_success();
        let body = match self.read_body(response).await {
            Ok(body) => body,
            // An unreadable error body only loses the detail; the status stays.
            Err(_) if !success => {
                uplan_debug!("Discarding unreadable error body for status={}", status);
                return SubmissionOutcome::ServerRejected {
                    status,
                    detail: None,
                };
            }
            Err(outcome) => return outcome,
        };
        uplan_debug!("Response status={} body_len={}", status, body.len());

        interpret_response(status, &body)
    }
}

/// Resolve `create` against the base URL, treating the base as a directory.
pub fn create_endpoint(base_url: &str) -> Result<Url, ClientError> {
    let invalid = |message: String| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        message,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    base.join(CREATE_PATH)
        .map_err(|err| invalid(err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> SubmissionOutcome {
    uplan_warn!("Response too large (max {}, actual {})", max_bytes, actual);
    SubmissionOutcome::TransportFailure {
        message: format!("response too large (max {max_bytes} bytes, got {actual})"),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmissionOutcome {
    if err.is_timeout() {
        uplan_warn!("Request timed out: {}", err);
    } else {
        uplan_warn!("Request failed: {}", err);
    }
    SubmissionOutcome::TransportFailure {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_endpoint_appends_to_root_and_subpaths() {
        assert_eq!(
            create_endpoint("http://localhost:8000").unwrap().as_str(),
            "http://localhost:8000/create"
        );
        assert_eq!(
            create_endpoint("https://uplan.example/app").unwrap().as_str(),
            "https://uplan.example/app/create"
        );
        assert_eq!(
            create_endpoint("https://uplan.example/app/?x=1").unwrap().as_str(),
            "https://uplan.example/app/create"
        );
    }

    #[test]
    fn create_endpoint_rejects_non_http() {
        assert!(matches!(
            create_endpoint("ftp://example.com"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            create_endpoint("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn request_url_encodes_both_parameters() {
        let client = ReqwestFeedClient::new(ClientSettings::default()).unwrap();
        let url = client.request_url(&SubmissionRequest::from_raw("051011,051012-3", ""));
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/create?courses=051011%2C051012-3&semester="
        );
    }
}
