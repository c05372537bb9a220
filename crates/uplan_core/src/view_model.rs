use crate::{parse_markup, plain_text, Locale, Span, SubmissionResult};

/// Prefix of the success panel. Not translated.
pub const FEED_URL_PREFIX: &str = "ICS-Feed URL: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTone {
    Success,
    Error,
}

/// Content of the result panel. Only `Markup` may carry structure; `Text`
/// is shown verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    Markup(Vec<Span>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub tone: ResultTone,
    pub body: ResultBody,
}

impl ResultPanel {
    pub(crate) fn loading(locale: Locale) -> Self {
        Self {
            tone: ResultTone::Success,
            body: ResultBody::Markup(parse_markup(locale.translations().loading_message)),
        }
    }

    pub(crate) fn from_result(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success { url, courses } => {
                // Server strings go into spans as text; they are not parsed.
                let mut spans = vec![
                    Span::Text(FEED_URL_PREFIX.to_string()),
                    Span::Strong(url),
                    Span::LineBreak,
                    Span::LineBreak,
                ];
                if !courses.is_empty() {
                    spans.push(Span::Text(courses.join("\n")));
                }
                Self {
                    tone: ResultTone::Success,
                    body: ResultBody::Markup(spans),
                }
            }
            SubmissionResult::Failure { message } => Self {
                tone: ResultTone::Error,
                body: ResultBody::Text(message),
            },
        }
    }

    pub fn plain_text(&self) -> String {
        match &self.body {
            ResultBody::Markup(spans) => plain_text(spans),
            ResultBody::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelsView {
    pub title: String,
    pub description: Vec<Span>,
    pub courses_label: String,
    pub courses_placeholder: String,
    pub semester_label: String,
    pub submit_button: String,
    pub disclaimer: Vec<Span>,
    pub imprint_link: String,
    pub privacy_link: String,
}

impl LabelsView {
    pub fn for_locale(locale: Locale) -> Self {
        let t = locale.translations();
        Self {
            title: t.title.to_string(),
            description: parse_markup(t.description),
            courses_label: t.courses_label.to_string(),
            courses_placeholder: t.courses_placeholder.to_string(),
            semester_label: t.semester_label.to_string(),
            submit_button: t.submit_button.to_string(),
            disclaimer: parse_markup(t.disclaimer),
            imprint_link: t.imprint_link.to_string(),
            privacy_link: t.privacy_link.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub locale: Locale,
    /// Document language code.
    pub lang_code: &'static str,
    /// Text of the language toggle: the code of the other locale.
    pub toggle_label: &'static str,
    pub labels: LabelsView,
    pub courses_input: String,
    pub semester_input: String,
    pub submit_enabled: bool,
    pub result: Option<ResultPanel>,
    pub dirty: bool,
}
