use std::io::{BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use uplan_core::{update, AppState, Locale, Msg, ResultTone};
use uplan_logging::{uplan_debug, uplan_info, uplan_warn};

use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command, HELP_TEXT};
use super::ui::render::{render_form, Renderer};

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Owns the state and applies every message on the calling thread, so the
/// trigger flag has a single writer.
pub struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(locale: Locale, runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::with_locale(locale),
            runner,
            renderer: Renderer::new(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the initial form.
    pub fn render_initial(&mut self) -> Result<()> {
        let view = self.state.view();
        let text = self.renderer.render_changes(&view);
        self.write(&text)
    }

    pub fn dispatch_msg(&mut self, msg: Msg) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        // The loading state is on screen before the request goes out.
        if was_dirty {
            let text = self.renderer.render_changes(&view);
            self.write(&text)?;
        }
        self.runner.enqueue(effects);
        Ok(())
    }

    /// Returns `false` once the user asked to quit.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        match parse_command(line) {
            Command::Courses(text) => self.dispatch_msg(Msg::CoursesChanged(text))?,
            Command::Semester(text) => self.dispatch_msg(Msg::SemesterChanged(text))?,
            Command::Lang(Some(locale)) => self.dispatch_msg(Msg::LanguageSelected(locale))?,
            Command::Lang(None) => self.dispatch_msg(Msg::LanguageToggled)?,
            Command::Submit => {
                if self.state.is_trigger_disabled() {
                    uplan_debug!("Submit refused: trigger disabled");
                    self.write("submit is disabled while a request is outstanding\n")?;
                } else {
                    self.dispatch_msg(Msg::SubmitClicked)?;
                }
            }
            Command::Show => {
                let text = render_form(&self.state.view());
                self.write(&text)?;
            }
            Command::Help => self.write(&format!("{HELP_TEXT}\n"))?,
            Command::Quit => return Ok(false),
            Command::Empty => {}
            Command::Invalid(message) => self.write(&format!("{message}\n"))?,
        }
        Ok(true)
    }

    /// Apply every settlement that already arrived.
    pub fn drain_settlements(&mut self) -> Result<()> {
        while let Some(msg) = self.runner.try_recv() {
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    /// Block until the outstanding submission, if any, has settled.
    pub fn wait_for_outstanding(&mut self) -> Result<()> {
        while self.state.is_trigger_disabled() {
            let msg = self
                .runner
                .recv()
                .context("engine stopped before the submission settled")?;
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    pub fn last_result_tone(&self) -> Option<ResultTone> {
        self.state.view().result.map(|panel| panel.tone)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .context("failed to write to output")
    }
}

/// Submit once and print the result. Returns whether the feed was created.
pub fn run_once<W: Write>(
    runner: EffectRunner,
    locale: Locale,
    courses: &str,
    semester: &str,
    out: W,
) -> Result<(bool, W)> {
    let mut app = App::new(locale, runner, out);
    app.dispatch_msg(Msg::CoursesChanged(courses.to_string()))?;
    app.dispatch_msg(Msg::SemesterChanged(semester.to_string()))?;
    // Only the result panel is printed in one-shot mode.
    app.renderer = Renderer::results_only(&app.state.view());
    app.dispatch_msg(Msg::SubmitClicked)?;
    app.wait_for_outstanding()?;

    let success = app.last_result_tone() == Some(ResultTone::Success);
    uplan_info!("One-shot submission finished success={}", success);
    Ok((success, app.into_output()))
}

/// Line-oriented front-end. Input lines and engine settlements are applied
/// on this thread; a reader thread feeds the lines.
pub fn run_interactive<R, W>(runner: EffectRunner, locale: Locale, input: R, out: W) -> Result<W>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    uplan_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });

    let mut app = App::new(locale, runner, out);
    app.render_initial()?;

    loop {
        app.drain_settlements()?;
        match line_rx.recv_timeout(TICK_INTERVAL) {
            Ok(line) => {
                if !app.handle_line(&line)? {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => app.dispatch_msg(Msg::Tick)?,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    // Requests are never cancelled; show the outcome before leaving.
    app.wait_for_outstanding()?;
    Ok(app.into_output())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use uplan_core::{FeedResponse, SubmissionOutcome, SubmissionRequest};
    use uplan_engine::{EngineHandle, FeedService};

    use super::*;

    /// Replays fixed outcomes and records the requests it saw.
    struct ScriptedService {
        outcomes: Mutex<Vec<SubmissionOutcome>>,
        seen: Arc<Mutex<Vec<SubmissionRequest>>>,
    }

    #[async_trait::async_trait]
    impl FeedService for ScriptedService {
        async fn create_feed(&self, request: &SubmissionRequest) -> SubmissionOutcome {
            self.seen.lock().unwrap().push(request.clone());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn runner_with(
        outcomes: Vec<SubmissionOutcome>,
    ) -> (EffectRunner, Arc<Mutex<Vec<SubmissionRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let service = ScriptedService {
            outcomes: Mutex::new(outcomes),
            seen: seen.clone(),
        };
        let engine = EngineHandle::with_service(Arc::new(service)).unwrap();
        (EffectRunner::new(engine), seen)
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn one_shot_success_prints_feed_url() {
        plain();
        let (runner, seen) = runner_with(vec![SubmissionOutcome::Success(FeedResponse {
            url: "https://x/cal.ics".to_string(),
            courses: vec!["051011-1 VO Algorithms (2024W)".to_string()],
        })]);

        let (success, out) =
            run_once(runner, Locale::En, " 051011 ", "2024W", Vec::new()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(success);
        assert!(text.contains(Locale::En.translations().loading_message));
        assert!(text.contains("https://x/cal.ics"));
        assert!(text.contains("051011-1 VO Algorithms (2024W)"));
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[SubmissionRequest::from_raw("051011", "2024W")]
        );
    }

    #[test]
    fn one_shot_rate_limit_reports_failure() {
        plain();
        let (runner, _) = runner_with(vec![SubmissionOutcome::RateLimited]);

        let (success, out) = run_once(runner, Locale::De, "051011", "", Vec::new()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!success);
        assert!(text.contains(Locale::De.translations().rate_limit_message));
    }

    #[test]
    fn interactive_session_submits_and_waits_for_result() {
        plain();
        let (runner, seen) = runner_with(vec![SubmissionOutcome::ServerRejected {
            status: 500,
            detail: None,
        }]);
        let input = Cursor::new(b"lang en\ncourses 051011, 051012-3\nsemester 2024 W\nsubmit\n".to_vec());

        let out = run_interactive(runner, Locale::De, input, Vec::new()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Create ICS Feed"));
        assert!(text.contains("HTTP 500"));
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[SubmissionRequest::from_raw("051011,051012-3", "2024W")]
        );
    }

    #[test]
    fn interactive_reports_unknown_commands() {
        plain();
        let (runner, seen) = runner_with(Vec::new());
        let input = Cursor::new(b"frobnicate\nquit\nsubmit\n".to_vec());

        let out = run_interactive(runner, Locale::En, input, Vec::new()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("unknown command 'frobnicate'"));
        assert!(seen.lock().unwrap().is_empty());
    }
}
