//! u:plan engine: HTTP submission to the feed service and effect execution.
mod client;
mod engine;
mod response;
mod types;

pub use client::{create_endpoint, ClientSettings, FeedService, ReqwestFeedClient, CREATE_PATH};
pub use engine::{EngineHandle, SubmissionTicket, ABANDONED_MESSAGE};
pub use response::{interpret_response, RATE_LIMIT_STATUS};
pub use types::{ClientError, Settlement};
