use std::ffi::OsStr;

use colored::Colorize;
use uplan_core::{
    parse_markup, AppViewModel, LabelsView, Locale, ResultBody, ResultPanel, ResultTone, Span,
};

/// Turns view models into terminal text, printing only what changed since
/// the previous render.
#[derive(Debug, Default)]
pub struct Renderer {
    last: Option<AppViewModel>,
    results_only: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that treats `view` as already on screen and from then on
    /// prints result panels only.
    pub fn results_only(view: &AppViewModel) -> Self {
        Self {
            last: Some(view.clone()),
            results_only: true,
        }
    }

    pub fn render_changes(&mut self, view: &AppViewModel) -> String {
        let mut out = String::new();
        match &self.last {
            None => out.push_str(&render_form(view)),
            Some(last) if self.results_only => {
                if last.result != view.result {
                    if let Some(panel) = &view.result {
                        push_line(&mut out, &render_result(panel));
                    }
                }
            }
            Some(last) => {
                if last.locale != view.locale {
                    out.push_str(&render_form(view));
                } else {
                    if last.courses_input != view.courses_input {
                        push_line(
                            &mut out,
                            &field_line(&view.labels.courses_label, &view.courses_input, ""),
                        );
                    }
                    if last.semester_input != view.semester_input {
                        push_line(
                            &mut out,
                            &field_line(&view.labels.semester_label, &view.semester_input, ""),
                        );
                    }
                }
                if last.result != view.result {
                    if let Some(panel) = &view.result {
                        push_line(&mut out, &render_result(panel));
                    }
                }
                if last.submit_enabled != view.submit_enabled && last.locale == view.locale {
                    push_line(&mut out, &submit_line(&view.labels, view.submit_enabled));
                }
            }
        }
        self.last = Some(view.clone());
        out
    }
}

pub fn render_form(view: &AppViewModel) -> String {
    let labels = &view.labels;
    let mut out = String::new();
    push_line(
        &mut out,
        &format!(
            "{} [{}]",
            escape_inert(&labels.title).bold(),
            view.toggle_label
        ),
    );
    push_line(&mut out, &render_spans(&labels.description));
    out.push('\n');
    push_line(
        &mut out,
        &field_line(
            &labels.courses_label,
            &view.courses_input,
            &labels.courses_placeholder,
        ),
    );
    push_line(
        &mut out,
        &field_line(&labels.semester_label, &view.semester_input, ""),
    );
    push_line(&mut out, &submit_line(labels, view.submit_enabled));
    out.push('\n');
    push_line(&mut out, &render_spans(&labels.disclaimer).dimmed().to_string());
    push_line(
        &mut out,
        &format!("{} | {}", labels.imprint_link, labels.privacy_link)
            .dimmed()
            .to_string(),
    );
    out
}

/// Success panels may carry limited markup; failures are printed verbatim
/// with control characters escaped.
pub fn render_result(panel: &ResultPanel) -> String {
    let text = match &panel.body {
        ResultBody::Markup(spans) => render_spans(spans),
        ResultBody::Text(text) => escape_inert(text),
    };
    match panel.tone {
        ResultTone::Success => text,
        ResultTone::Error => text.red().to_string(),
    }
}

pub fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => escape_inert(text),
            Span::Strong(text) => escape_inert(text).bold().to_string(),
            Span::Link { href, text } => {
                format!("{} <{}>", escape_inert(text).underline(), escape_inert(href))
            }
            Span::LineBreak => "\n".to_string(),
        })
        .collect()
}

/// Neutralise control characters so text from the network cannot drive
/// the terminal. Newlines and tabs are kept.
pub fn escape_inert(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' || ch == '\t' || !ch.is_control() {
            out.push(ch);
        } else {
            out.extend(ch.escape_default());
        }
    }
    out
}

/// Whether ANSI styling should be written. `NO_COLOR` with any non-empty
/// value turns it off, and so does output that is not a terminal.
pub fn should_colorize(stdout_is_terminal: bool, no_color: Option<&OsStr>) -> bool {
    stdout_is_terminal && !matches!(no_color, Some(value) if !value.is_empty())
}

/// Label table of one locale, one `key: value` line per string.
pub fn render_labels(locale: Locale) -> String {
    let t = locale.translations();
    let labels = LabelsView::for_locale(locale);
    let rows = [
        ("title", labels.title),
        ("description", render_spans(&labels.description)),
        ("coursesLabel", labels.courses_label),
        ("coursesPlaceholder", labels.courses_placeholder),
        ("semesterLabel", labels.semester_label),
        ("submitButton", labels.submit_button),
        ("disclaimer", render_spans(&labels.disclaimer)),
        ("imprintLink", labels.imprint_link),
        ("privacyLink", labels.privacy_link),
        ("loadingMessage", render_spans(&parse_markup(t.loading_message))),
        ("rateLimitMessage", t.rate_limit_message.to_string()),
    ];
    let mut out = String::new();
    for (key, value) in rows {
        push_line(&mut out, &format!("{key}: {value}"));
    }
    out
}

fn field_line(label: &str, value: &str, placeholder: &str) -> String {
    if value.is_empty() && !placeholder.is_empty() {
        format!("{label}: {}", placeholder.dimmed())
    } else {
        format!("{label}: {}", escape_inert(value))
    }
}

fn submit_line(labels: &LabelsView, enabled: bool) -> String {
    let button = format!("[ {} ]", labels.submit_button);
    if enabled {
        button.bold().to_string()
    } else {
        format!("{} (disabled)", button.dimmed())
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use uplan_core::{update, AppState, FeedResponse, Msg, SubmissionOutcome};

    fn plain() {
        colored::control::set_override(false);
    }

    fn settled(outcome: SubmissionOutcome) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::SubmissionSettled {
                submission_id: 1,
                outcome,
            },
        );
        state.view()
    }

    #[test]
    fn rejection_detail_renders_exactly() {
        plain();
        let view = settled(SubmissionOutcome::ServerRejected {
            status: 404,
            detail: Some("unknown course".to_string()),
        });
        assert_eq!(render_result(view.result.as_ref().unwrap()), "unknown course");
    }

    #[test]
    fn success_renders_url_and_courses() {
        plain();
        let view = settled(SubmissionOutcome::Success(FeedResponse {
            url: "https://x/cal.ics".to_string(),
            courses: vec!["051011".to_string()],
        }));
        assert_eq!(
            render_result(view.result.as_ref().unwrap()),
            "ICS-Feed URL: https://x/cal.ics\n\n051011"
        );
    }

    #[test]
    fn failure_text_cannot_emit_escape_sequences() {
        plain();
        let view = settled(SubmissionOutcome::ServerRejected {
            status: 400,
            detail: Some("\u{1b}[2Jgotcha <strong>x</strong>".to_string()),
        });
        let rendered = render_result(view.result.as_ref().unwrap());
        assert!(!rendered.contains('\u{1b}'));
        assert_eq!(rendered, "\\u{1b}[2Jgotcha <strong>x</strong>");
    }

    #[test]
    fn links_show_their_target() {
        plain();
        let spans = parse_markup("see <a href='https://a.example'>terms</a>");
        assert_eq!(render_spans(&spans), "see terms <https://a.example>");
    }

    #[test]
    fn changes_only_print_what_moved() {
        plain();
        let mut renderer = Renderer::new();
        let state = AppState::new();
        let first = renderer.render_changes(&state.view());
        assert!(first.contains("ICS-Feed erstellen"));

        assert_eq!(renderer.render_changes(&state.view()), "");

        let (state, _) = update(state, Msg::CoursesChanged("051011".to_string()));
        assert_eq!(
            renderer.render_changes(&state.view()),
            "Lehrveranstaltungen: 051011\n"
        );

        let (state, _) = update(state, Msg::SubmitClicked);
        let loading = renderer.render_changes(&state.view());
        assert!(loading.contains(Locale::De.translations().loading_message));
        assert!(loading.contains("(disabled)"));
    }

    #[test]
    fn results_only_skips_form_changes() {
        plain();
        let state = AppState::new();
        let mut renderer = Renderer::results_only(&state.view());

        let (state, _) = update(state, Msg::LanguageToggled);
        assert_eq!(renderer.render_changes(&state.view()), "");

        let (state, _) = update(state, Msg::SubmitClicked);
        assert_eq!(
            renderer.render_changes(&state.view()),
            format!("{}\n", Locale::En.translations().loading_message)
        );
    }

    #[test]
    fn colour_only_on_terminals_without_no_color() {
        assert!(should_colorize(true, None));
        assert!(should_colorize(true, Some(OsStr::new(""))));
        assert!(!should_colorize(true, Some(OsStr::new("1"))));
        assert!(!should_colorize(false, None));
    }

    #[test]
    fn label_table_lists_all_keys() {
        plain();
        let table = render_labels(Locale::En);
        assert_eq!(table.lines().count(), 11);
        assert!(table.contains("rateLimitMessage: Too many requests. Please try again later."));
    }
}
