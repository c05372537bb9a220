use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use uplan_core::{SubmissionId, SubmissionOutcome, SubmissionRequest};
use uplan_logging::{uplan_debug, uplan_warn};

use crate::client::{ClientSettings, FeedService, ReqwestFeedClient};
use crate::{ClientError, Settlement};

/// Message used when a submission task ends without producing an outcome.
pub const ABANDONED_MESSAGE: &str = "submission ended without a response";

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: SubmissionRequest,
    },
}

/// Runs submissions on a background tokio runtime and reports one
/// [`Settlement`] per submission.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<Settlement>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = ReqwestFeedClient::new(settings)?;
        Self::with_service(Arc::new(client))
    }

    pub fn with_service(service: Arc<dyn FeedService>) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, submission_id: SubmissionId, request: SubmissionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<Settlement> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Settlement> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next settlement. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<Settlement> {
        self.event_rx.recv().ok()
    }
}

/// Scoped "busy" token for one submission. Consuming it with
/// [`SubmissionTicket::settle`] reports the outcome; dropping it unsettled
/// (early return, panic in the task, runtime shutdown) reports a transport
/// failure instead, so the front-end always gets its trigger back.
pub struct SubmissionTicket {
    submission_id: SubmissionId,
    event_tx: Option<mpsc::Sender<Settlement>>,
}

impl SubmissionTicket {
    pub fn acquire(submission_id: SubmissionId, event_tx: mpsc::Sender<Settlement>) -> Self {
        Self {
            submission_id,
            event_tx: Some(event_tx),
        }
    }

    pub fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    pub fn settle(mut self, outcome: SubmissionOutcome) {
        self.send(outcome);
    }

    fn send(&mut self, outcome: SubmissionOutcome) {
        if let Some(tx) = self.event_tx.take() {
            let _ = tx.send(Settlement {
                submission_id: self.submission_id,
                outcome,
            });
        }
    }
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        if self.event_tx.is_some() {
            uplan_warn!(
                "Submission {} dropped without settlement",
                self.submission_id
            );
            self.send(SubmissionOutcome::TransportFailure {
                message: ABANDONED_MESSAGE.to_string(),
            });
        }
    }
}

async fn handle_command(
    service: &dyn FeedService,
    command: EngineCommand,
    event_tx: mpsc::Sender<Settlement>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            request,
        } => {
            let ticket = SubmissionTicket::acquire(submission_id, event_tx);
            let outcome = service.create_feed(&request).await;
            uplan_debug!(
                "Submission {} finished: {}",
                ticket.submission_id(),
                outcome.kind_label()
            );
            ticket.settle(outcome);
        }
    }
}
