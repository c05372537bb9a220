#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the courses input.
    CoursesChanged(String),
    /// User edited the semester input.
    SemesterChanged(String),
    /// User clicked the language toggle.
    LanguageToggled,
    /// Front-end selected a language explicitly (command line, config).
    LanguageSelected(crate::Locale),
    /// User confirmed the form.
    SubmitClicked,
    /// Engine settlement for a submission.
    SubmissionSettled {
        submission_id: crate::SubmissionId,
        outcome: crate::SubmissionOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
