//! u:plan core: pure submission state machine, label table and view-model helpers.
mod effect;
mod locale;
mod markup;
mod msg;
mod state;
mod submission;
mod update;
mod view_model;

pub use effect::Effect;
pub use locale::{Locale, Translations};
pub use markup::{parse_markup, plain_text, Span};
pub use msg::Msg;
pub use state::{AppState, SubmissionPhase};
pub use submission::{
    normalize_field, FeedResponse, SubmissionId, SubmissionOutcome, SubmissionRequest,
    SubmissionResult,
};
pub use update::update;
pub use view_model::{
    AppViewModel, LabelsView, ResultBody, ResultPanel, ResultTone, FEED_URL_PREFIX,
};
