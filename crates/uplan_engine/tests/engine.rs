use std::sync::Arc;
use std::time::Duration;

use uplan_core::{SubmissionOutcome, SubmissionRequest};
use uplan_engine::{ClientSettings, EngineHandle, FeedService, Settlement, ABANDONED_MESSAGE};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(10);

struct PanickingService;

#[async_trait::async_trait]
impl FeedService for PanickingService {
    async fn create_feed(&self, _request: &SubmissionRequest) -> SubmissionOutcome {
        panic!("service blew up");
    }
}

struct FixedService(SubmissionOutcome);

#[async_trait::async_trait]
impl FeedService for FixedService {
    async fn create_feed(&self, _request: &SubmissionRequest) -> SubmissionOutcome {
        self.0.clone()
    }
}

#[test]
fn engine_reports_service_outcome_with_submission_id() {
    let engine =
        EngineHandle::with_service(Arc::new(FixedService(SubmissionOutcome::RateLimited)))
            .expect("engine");

    engine.submit(7, SubmissionRequest::from_raw("051011", ""));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(Settlement {
            submission_id: 7,
            outcome: SubmissionOutcome::RateLimited,
        })
    );
    assert_eq!(engine.try_recv(), None);
}

#[test]
fn panicking_submission_still_settles() {
    let engine = EngineHandle::with_service(Arc::new(PanickingService)).expect("engine");

    engine.submit(1, SubmissionRequest::from_raw("051011", ""));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(Settlement {
            submission_id: 1,
            outcome: SubmissionOutcome::TransportFailure {
                message: ABANDONED_MESSAGE.to_string(),
            },
        })
    );
}

#[test]
fn engine_talks_to_the_feed_service() {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/create"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_raw(r#"{"detail":"unknown course"}"#, "application/json"),
            )
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("engine");
    engine.submit(2, SubmissionRequest::from_raw("999999", ""));

    let settlement = engine.recv_timeout(WAIT).expect("settlement");
    assert_eq!(settlement.submission_id, 2);
    assert_eq!(
        settlement.outcome,
        SubmissionOutcome::ServerRejected {
            status: 404,
            detail: Some("unknown course".to_string()),
        }
    );
}
