use crate::view_model::{AppViewModel, LabelsView, ResultPanel};
use crate::{Locale, SubmissionId, SubmissionOutcome, SubmissionRequest, SubmissionResult};

/// Whether a submission is outstanding. The trigger is disabled exactly
/// while the phase is `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Loading { submission_id: SubmissionId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    locale: Locale,
    courses_input: String,
    semester_input: String,
    phase: SubmissionPhase,
    result: Option<ResultPanel>,
    last_submission_id: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_trigger_disabled(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Loading { .. })
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            locale: self.locale,
            lang_code: self.locale.code(),
            toggle_label: self.locale.toggled().code(),
            labels: LabelsView::for_locale(self.locale),
            courses_input: self.courses_input.clone(),
            semester_input: self.semester_input.clone(),
            submit_enabled: !self.is_trigger_disabled(),
            result: self.result.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_courses_input(&mut self, text: String) {
        if self.courses_input != text {
            self.courses_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_semester_input(&mut self, text: String) {
        if self.semester_input != text {
            self.semester_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        if self.locale != locale {
            self.locale = locale;
            self.mark_dirty();
        }
    }

    /// Idle -> Loading. Returns `None` while another submission is outstanding.
    pub(crate) fn begin_submission(&mut self) -> Option<(SubmissionId, SubmissionRequest)> {
        if self.is_trigger_disabled() {
            return None;
        }
        self.last_submission_id += 1;
        let submission_id = self.last_submission_id;
        self.phase = SubmissionPhase::Loading { submission_id };
        self.result = Some(ResultPanel::loading(self.locale));
        self.mark_dirty();
        Some((
            submission_id,
            SubmissionRequest::from_raw(&self.courses_input, &self.semester_input),
        ))
    }

    /// Loading -> Idle, rendering the outcome in the current locale.
    /// Returns `false` for settlements that do not match the outstanding
    /// submission.
    pub(crate) fn settle(&mut self, submission_id: SubmissionId, outcome: SubmissionOutcome) -> bool {
        match self.phase {
            SubmissionPhase::Loading {
                submission_id: outstanding,
            } if outstanding == submission_id => {
                let result = SubmissionResult::from_outcome(outcome, self.locale);
                self.result = Some(ResultPanel::from_result(result));
                self.phase = SubmissionPhase::Idle;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }
}
