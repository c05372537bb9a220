use crate::{SubmissionId, SubmissionRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue `GET /create` for the request; the runner must answer with
    /// exactly one `Msg::SubmissionSettled` carrying the same id.
    Submit {
        submission_id: SubmissionId,
        request: SubmissionRequest,
    },
}
