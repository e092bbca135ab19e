//! Widget behavior, independent of the terminal
//!
//! The controller owns the widget's end of the message protocol: it answers
//! requests arriving in the content mailbox, reports hint usage to the worker,
//! and polls outstanding replies once per frame.

use std::time::{Duration, Instant};

use chrono::{Local, Utc};
use tokio::sync::oneshot;

use super::command::Command;
use super::state::{AppState, Overlay, PendingAnswer, ToastKind};
use crate::config::{HintMode, SettingsRecord};
use crate::mentor;
use crate::messaging::{
    Endpoint, Envelope, Inbox, MentorContext, MessagingError, PendingReply, Port, Request, Response,
};
use crate::problem::Platform;
use crate::session::{ALL_UNLOCKED_NOTICE, MentorSession, Reveal};
use crate::stats::PopupSummary;
use crate::stats::popup::active_problem_title;
use crate::storage::Store;
use crate::worker::{ASK_MENTOR_MENU_ID, Deferred, MenuClickHandler, track_question};

/// Placeholder when no answer could be obtained
pub const ANSWER_UNAVAILABLE: &str = "The mentor is unavailable right now. Try again in a moment.";

pub struct Controller {
    pub state: AppState,
    url: String,
    store: Store,
    worker: Port,
    content: Port,
    inbox: Inbox,
    menu: Option<MenuClickHandler>,
    answers: Deferred,
}

impl Controller {
    /// `content` is this widget's own mailbox
    pub fn new(
        url: impl Into<String>,
        store: Store,
        worker: Port,
        content: (Port, Inbox),
        answer_delay: Duration,
    ) -> Self {
        let settings = SettingsRecord::load(&store);
        let (content, inbox) = content;
        Self {
            state: AppState { settings, ..Default::default() },
            url: url.into(),
            store,
            worker,
            content,
            inbox,
            menu: None,
            answers: Deferred::new(answer_delay),
        }
    }

    /// Context-menu routing, for `:select`
    pub fn with_menu(mut self, menu: MenuClickHandler) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Page analysis finished
    pub fn load_session(&mut self, session: MentorSession) {
        if !session.is_detected() {
            tracing::debug!("Widget showing not-detected state for {}", self.url);
        }
        self.state.session = Some(session);
    }

    /// Unlock the next hint and report it
    pub fn reveal_next(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };

        let usage = match session.reveal_next() {
            Reveal::Unlocked { usage, .. } => usage,
            Reveal::AllUnlocked => {
                self.state.push_toast(ALL_UNLOCKED_NOTICE, ToastKind::Success);
                return;
            }
            Reveal::NotDetected => {
                self.state.push_toast("No problem detected on this page.", ToastKind::Warning);
                return;
            }
        };

        let progress = session.progress_snapshot(Utc::now().timestamp_millis());
        for request in [Request::TrackHintUsage { data: usage }, Request::SaveProgress { data: progress }] {
            if let Err(e) = self.route(request) {
                tracing::warn!("Hint usage not recorded: {}", e);
            }
        }
    }

    /// Ask the widget's own responder, answered after the simulated delay
    pub fn ask(&mut self, question: &str) {
        let Some(question) = mentor::validate_question(question) else {
            return;
        };

        track_question(&self.store, Local::now().date_naive());

        let (tx, rx) = oneshot::channel();
        let answers = self.answers;
        let asked = question.to_string();
        tokio::spawn(async move {
            let answer = answers.resolve(|| mentor::respond_inline(&asked).to_string()).await;
            let _ = tx.send(answer);
        });

        self.state.qa.question = Some(question.to_string());
        self.state.qa.answer = None;
        self.state.qa.pending = Some(PendingAnswer::Inline(rx));
    }

    /// Ask the worker's responder
    pub fn ask_worker(&mut self, question: &str) {
        let Some(question) = mentor::validate_question(question) else {
            return;
        };

        let context = MentorContext {
            problem_title: self.problem_title(),
            url: Some(self.url.clone()),
        };
        self.state.qa.question = Some(question.to_string());
        self.state.qa.answer = None;

        match self.route(Request::AskMentorQuestion { question: question.to_string(), context }) {
            Ok(Some(pending)) => self.state.qa.pending = Some(PendingAnswer::Worker(pending)),
            Ok(None) => self.state.qa.answer = Some(ANSWER_UNAVAILABLE.to_string()),
            Err(e) => {
                tracing::warn!("Question not delivered: {}", e);
                self.state.qa.answer = Some(ANSWER_UNAVAILABLE.to_string());
            }
        }
    }

    /// Use the "Ask Coding Mentor" menu entry on `text`
    pub fn select_text(&mut self, text: &str) {
        let Some(menu) = &self.menu else {
            self.state.command_line.set_error("Context menu is not installed");
            return;
        };
        match menu.on_click(ASK_MENTOR_MENU_ID, text) {
            Ok(true) => {}
            Ok(false) => self.state.command_line.set_error("Context menu is not installed"),
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    pub fn toggle_widget(&mut self) {
        if let Some(session) = self.state.session.as_mut() {
            session.toggle_minimized();
        }
    }

    /// The popup's minimize button: message the widget, then close
    pub fn toggle_widget_from_popup(&mut self) {
        if let Err(e) = self.route(Request::ToggleWidget) {
            tracing::warn!("Popup could not reach the widget: {}", e);
        }
        self.state.overlay = Overlay::None;
        self.state.popup.pending = None;
    }

    pub fn record_editor_activity(&mut self) {
        if let Some(session) = self.state.session.as_mut() {
            session.record_editor_activity();
            self.state.command_line.set_message(format!(
                "Attempts: {}",
                session.progression().attempts()
            ));
        }
    }

    /// Flag the current problem solved
    pub fn mark_solved(&mut self) {
        let Some(session) = self.state.session.as_ref() else {
            return;
        };
        if !session.is_detected() {
            self.state.push_toast("No problem detected on this page.", ToastKind::Warning);
            return;
        }
        if !self.state.settings.track_progress {
            self.state.push_toast("Progress tracking is turned off.", ToastKind::Info);
            return;
        }

        let now_ms = Utc::now().timestamp_millis();
        let mut progress = session.progress_snapshot(now_ms);
        match self.store.problem_progress(&progress.problem_id) {
            Ok(Some(existing)) => progress.solved = existing.solved,
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read progress: {}", e),
        }

        let solved = self
            .store
            .save_progress(&progress)
            .and_then(|_| self.store.solve_problem(&progress.problem_id, now_ms, Local::now().date_naive()));
        match solved {
            Ok(true) => self.state.push_toast("Marked as solved. Nice work!", ToastKind::Success),
            Ok(false) => self.state.push_toast("Already marked as solved.", ToastKind::Info),
            Err(e) => {
                tracing::warn!("Failed to mark {} solved: {}", progress.problem_id, e);
                self.state.command_line.set_error("Could not save progress");
            }
        }
    }

    /// Show or hide the popup; showing it asks the widget for the problem title
    pub fn toggle_popup(&mut self) {
        self.state.toggle_overlay(Overlay::Popup);
        if self.state.overlay != Overlay::Popup {
            self.state.popup.pending = None;
            return;
        }

        self.state.settings = SettingsRecord::load(&self.store);
        self.state.popup.summary = None;
        match self.route(Request::GetCurrentProblem) {
            Ok(Some(pending)) => self.state.popup.pending = Some(pending),
            Ok(None) => self.state.popup.summary = Some(self.popup_summary(None)),
            Err(e) => {
                tracing::debug!("Popup could not reach the widget: {}", e);
                self.state.popup.summary = Some(self.popup_summary(None));
            }
        }
    }

    /// Deliver `request` to the endpoint that handles it
    ///
    /// Yields the pending reply for requests that expect one.
    fn route(&self, request: Request) -> Result<Option<PendingReply>, MessagingError> {
        let port = match request.endpoint() {
            Endpoint::Worker => &self.worker,
            Endpoint::Content => &self.content,
        };
        tracing::trace!("{} -> {}", request.action(), port.name());

        if request.expects_response() {
            port.dispatch(request).map(Some)
        } else {
            port.send(request).map(|_| None)
        }
    }

    fn popup_summary(&self, active_problem: Option<String>) -> PopupSummary {
        PopupSummary::load(
            &self.store,
            Platform::detect(&self.url),
            active_problem,
            Local::now().date_naive(),
        )
    }

    /// Run a parsed command, returns true if should exit
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Hint => self.reveal_next(),
            Command::Ask(question) => self.ask(&question),
            Command::Select(text) => self.select_text(&text),
            Command::Solved => self.mark_solved(),
            Command::Toggle => self.toggle_widget(),
            Command::Popup => self.toggle_popup(),
            Command::Help => self.state.toggle_overlay(Overlay::Help),
            Command::Quit => return true,
            Command::Nop => self.state.command_line.message = None,
        }
        false
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self, now: Instant) {
        self.drain_inbox();
        self.poll_answer();
        self.poll_popup();
        self.maybe_timed_hint(now);
        self.state.expire_toasts(now);
    }

    fn problem_title(&self) -> Option<String> {
        self.state
            .session
            .as_ref()
            .filter(|s| s.is_detected())
            .map(|s| s.record().title.clone())
    }

    fn drain_inbox(&mut self) {
        while let Ok(envelope) = self.inbox.try_recv() {
            self.handle(envelope);
        }
    }

    fn handle(&mut self, envelope: Envelope) {
        let (request, responder) = envelope.into_parts();
        match request {
            Request::ToggleWidget => self.toggle_widget(),
            Request::GetCurrentProblem => {
                let problem_title = self.problem_title();
                responder.respond(Response::CurrentProblem { problem_title });
            }
            Request::AskAboutSelection { selected_text } => self.ask_worker(&selected_text),
            other => tracing::warn!("Widget does not handle {}", other.action()),
        }
    }

    fn poll_answer(&mut self) {
        let outcome = match self.state.qa.pending.as_mut() {
            None => return,
            Some(PendingAnswer::Inline(rx)) => match rx.try_recv() {
                Ok(answer) => Some(answer),
                Err(oneshot::error::TryRecvError::Empty) => return,
                Err(oneshot::error::TryRecvError::Closed) => None,
            },
            Some(PendingAnswer::Worker(pending)) => match pending.poll() {
                Ok(None) => return,
                Ok(Some(Response::MentorAnswer { response })) => Some(response),
                Ok(Some(other)) => {
                    tracing::warn!("Unexpected reply to {}: {:?}", pending.action(), other);
                    None
                }
                Err(e) => {
                    tracing::warn!("No answer to {} from the mentor: {}", pending.action(), e);
                    None
                }
            },
        };

        self.state.qa.pending = None;
        self.state.qa.answer = Some(outcome.unwrap_or_else(|| ANSWER_UNAVAILABLE.to_string()));
    }

    fn poll_popup(&mut self) {
        let Some(pending) = self.state.popup.pending.as_mut() else {
            return;
        };
        let reply = match pending.poll() {
            Ok(None) => return,
            Ok(Some(response)) => Ok(response),
            Err(e) => {
                tracing::debug!("No reply to {}: {}", pending.action(), e);
                Err(e)
            }
        };
        self.state.popup.pending = None;
        self.state.popup.summary = Some(self.popup_summary(active_problem_title(reply)));
    }

    fn maybe_timed_hint(&mut self, now: Instant) {
        if self.state.settings.hint_mode != HintMode::Timed {
            return;
        }
        let delay = Duration::from_secs(self.state.settings.timed_delay);
        let due = self.state.session.as_ref().is_some_and(|s| s.timed_hint_due(now, delay));
        if due {
            tracing::debug!("Timed hint released");
            self.reveal_next();
        }
    }
}
