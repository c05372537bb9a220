use uplan_logging::{uplan_debug, uplan_info, uplan_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CoursesChanged(text) => {
            state.set_courses_input(text);
            Vec::new()
        }
        Msg::SemesterChanged(text) => {
            state.set_semester_input(text);
            Vec::new()
        }
        Msg::LanguageToggled => {
            let next = state.locale().toggled();
            state.set_locale(next);
            Vec::new()
        }
        Msg::LanguageSelected(locale) => {
            state.set_locale(locale);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((submission_id, request)) => {
                uplan_info!(
                    "Submission {} started courses_len={} semester={:?}",
                    submission_id,
                    request.courses().len(),
                    request.semester()
                );
                vec![Effect::Submit {
                    submission_id,
                    request,
                }]
            }
            None => {
                uplan_debug!("Submit ignored: a submission is already outstanding");
                Vec::new()
            }
        },
        Msg::SubmissionSettled {
            submission_id,
            outcome,
        } => {
            let kind = outcome.kind_label();
            if state.settle(submission_id, outcome) {
                uplan_info!("Submission {} settled: {}", submission_id, kind);
            } else {
                uplan_warn!(
                    "Ignoring settlement for submission {} ({}): not outstanding",
                    submission_id,
                    kind
                );
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
