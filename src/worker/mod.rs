//! Background worker
//!
//! Owns the storage bridge, answers hint and question requests through a
//! [`MentorBackend`], and forwards context-menu clicks to the widget. Storage
//! and delivery failures are logged and dropped; nothing here retries.

pub mod backend;
pub mod notify;

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tokio::task::JoinHandle;

use crate::config::SettingsRecord;
use crate::messaging::{Envelope, Inbox, MessagingError, Port, Request, Response};
use crate::storage::{HintUsage, ProblemProgress, StorageError, Store};

pub use backend::{CannedMentor, Deferred, MentorBackend};
pub use notify::{
    ASK_MENTOR_MENU_ID, ContextMenu, LogNotifier, MenuClickHandler, Notification, Notifier,
};

use crate::hints::HINT_LEVELS;

/// The background worker
pub struct Worker<B, N> {
    store: Store,
    backend: Arc<B>,
    notifier: N,
    menu: ContextMenu,
    content: Option<Port>,
}

impl<B: MentorBackend, N: Notifier> Worker<B, N> {
    pub fn new(store: Store, backend: B, notifier: N) -> Self {
        Self { store, backend: Arc::new(backend), notifier, menu: ContextMenu::default(), content: None }
    }

    /// Port of the widget, used to forward context-menu selections
    pub fn with_content_port(mut self, port: Port) -> Self {
        self.content = Some(port);
        self
    }

    /// First-run setup: default settings and the context-menu entry
    ///
    /// Returns whether default settings were written.
    pub fn on_installed(&mut self) -> Result<bool, StorageError> {
        self.menu.register_ask_mentor();
        let installed = SettingsRecord::install_defaults(&self.store)?;
        if installed {
            tracing::info!("Coding Mentor installed; default settings written");
        }
        Ok(installed)
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Run the worker on its own task until every port is dropped
    pub fn spawn(self, inbox: Inbox) -> JoinHandle<()> {
        tokio::spawn(self.run(inbox))
    }

    /// Process requests until the inbox closes
    pub async fn run(self, mut inbox: Inbox) {
        while let Some(envelope) = inbox.recv().await {
            self.handle(envelope);
        }
        tracing::debug!("Worker inbox closed");
    }

    /// Handle one request
    ///
    /// Request/response actions are answered from a spawned task so a slow
    /// backend never holds up fire-and-forget traffic.
    pub fn handle(&self, envelope: Envelope) {
        let (request, responder) = envelope.into_parts();
        tracing::debug!("Worker received {}", request.action());

        match request {
            Request::TrackHintUsage { data } => self.track_hint_usage(data),
            Request::SaveProgress { data } => self.save_progress(data),
            Request::GetProblemHints { problem_data } => {
                let backend = Arc::clone(&self.backend);
                tokio::spawn(async move {
                    let hints = backend.problem_hints(problem_data).await;
                    if !responder.respond(Response::Hints { hints }) {
                        tracing::debug!("Hint requester went away");
                    }
                });
            }
            Request::AskMentorQuestion { question, context } => {
                track_question(&self.store, Local::now().date_naive());
                let backend = Arc::clone(&self.backend);
                tokio::spawn(async move {
                    let response = backend.answer(question, context).await;
                    if !responder.respond(Response::MentorAnswer { response }) {
                        tracing::debug!("Question asker went away");
                    }
                });
            }
            other => {
                tracing::warn!("Worker does not handle {}", other.action());
            }
        }
    }

    fn track_hint_usage(&self, usage: HintUsage) {
        let settings = SettingsRecord::load(&self.store);
        if !settings.track_progress {
            tracing::debug!("Progress tracking disabled; hint usage not stored");
            return;
        }

        let level = usage.hint_level;
        let title = usage.problem_title.clone();
        match self.store.track_hint_usage(usage, Utc::now().timestamp_millis(), Local::now().date_naive())
        {
            Ok(_) => {
                if level as usize == HINT_LEVELS {
                    let message = match title {
                        Some(title) if !title.is_empty() => {
                            format!("You've seen every hint for {}. Time to code it up!", title)
                        }
                        _ => "You've seen every hint. Time to code it up!".to_string(),
                    };
                    self.show_notification("All hints unlocked", &message);
                }
            }
            Err(e) => tracing::warn!("Failed to track hint usage: {}", e),
        }
    }

    fn save_progress(&self, mut progress: ProblemProgress) {
        let settings = SettingsRecord::load(&self.store);
        if !settings.track_progress {
            return;
        }

        // A later snapshot from the widget never un-solves a problem
        match self.store.problem_progress(&progress.problem_id) {
            Ok(Some(existing)) => progress.solved |= existing.solved,
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read progress for {}: {}", progress.problem_id, e),
        }

        if let Err(e) = self.store.save_progress(&progress) {
            tracing::warn!("Failed to save progress for {}: {}", progress.problem_id, e);
        }
    }

    /// Show a basic notification if the user allows them
    pub fn show_notification(&self, title: &str, message: &str) {
        if SettingsRecord::load(&self.store).enable_notifications {
            self.notifier.notify(&Notification::basic(title, message));
        }
    }

    /// Click routing for the entries registered so far
    ///
    /// The handler outlives the worker being moved onto its task.
    pub fn menu_handler(&self) -> MenuClickHandler {
        MenuClickHandler::new(self.menu.clone(), self.content.clone())
    }

    /// A context-menu entry was clicked with `selection` highlighted
    pub fn on_context_menu_click(&self, item_id: &str, selection: &str) -> Result<bool, MessagingError> {
        self.menu_handler().on_click(item_id, selection)
    }
}

/// Count a question put to the mentor unless progress tracking is off
///
/// Shared by the worker and the widget's own responder.
pub fn track_question(store: &Store, today: NaiveDate) {
    if !SettingsRecord::load(store).track_progress {
        tracing::debug!("Progress tracking disabled; question not counted");
        return;
    }
    if let Err(e) = store.record_question(today) {
        tracing::warn!("Failed to record question: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::classify::ProblemCategory;
    use crate::hints::hints_for;
    use crate::messaging::{MentorContext, mailbox};
    use crate::problem::ProblemRecord;
    use crate::storage::StorageArea;
    use crate::storage::tests::temp_store;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<Notification>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) {
            self.sent.lock().unwrap().push(notification.clone());
        }
    }

    fn usage(level: u8) -> HintUsage {
        HintUsage {
            hint_level: level,
            url: "https://leetcode.com/problems/two-sum/".into(),
            problem_type: Some("array".into()),
            problem_title: Some("Two Sum".into()),
        }
    }

    #[tokio::test]
    async fn answers_hint_and_question_requests() {
        let (_dir, store) = temp_store();
        let (port, inbox) = mailbox("worker");
        let handle = Worker::new(store, CannedMentor::immediate(), LogNotifier).spawn(inbox);

        let record = ProblemRecord {
            title: "Two Sum".into(),
            description: "Find indices adding to target.".into(),
            tags: vec!["Array".into()],
            ..Default::default()
        };
        let response = port.request(Request::GetProblemHints { problem_data: record }).await.unwrap();
        assert_eq!(response, Response::Hints { hints: hints_for(ProblemCategory::Array) });

        let response = port
            .request(Request::AskMentorQuestion {
                question: "What's the time complexity?".into(),
                context: MentorContext::default(),
            })
            .await
            .unwrap();
        match response {
            Response::MentorAnswer { response } => {
                assert!(response.starts_with("To analyze time complexity"))
            }
            other => panic!("unexpected {other:?}"),
        }

        drop(port);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn asked_questions_are_counted() {
        let (_dir, store) = temp_store();
        let (port, inbox) = mailbox("worker");
        let handle = Worker::new(store.clone(), CannedMentor::immediate(), LogNotifier).spawn(inbox);

        for question in ["How do I optimize this?", "Why is it wrong?"] {
            let request = Request::AskMentorQuestion {
                question: question.into(),
                context: MentorContext::default(),
            };
            port.request(request).await.unwrap();
        }
        drop(port);
        handle.await.unwrap();

        let today = Local::now().date_naive();
        assert_eq!(store.total_stats().unwrap().questions_asked, 2);
        assert_eq!(store.daily_stats().unwrap().day(today).questions_asked, 2);
        assert!(store.keys(StorageArea::Local).unwrap().contains(&"totalStats".to_string()));
    }

    #[tokio::test]
    async fn questions_not_counted_without_tracking() {
        let (_dir, store) = temp_store();
        SettingsRecord { track_progress: false, ..Default::default() }.save(&store).unwrap();

        track_question(&store, Local::now().date_naive());
        assert_eq!(store.total_stats().unwrap().questions_asked, 0);
    }

    #[tokio::test]
    async fn tracks_usage_and_notifies_on_last_hint() {
        let (_dir, store) = temp_store();
        let notifier = RecordingNotifier::default();
        let (port, inbox) = mailbox("worker");
        let handle = Worker::new(store.clone(), CannedMentor::immediate(), notifier.clone()).spawn(inbox);

        for level in 1..=4 {
            port.send(Request::TrackHintUsage { data: usage(level) }).unwrap();
        }
        drop(port);
        handle.await.unwrap();

        assert_eq!(store.hint_analytics().unwrap().len(), 4);
        assert_eq!(store.total_stats().unwrap().total_hints, 4);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].message.contains("Two Sum"));
    }

    #[tokio::test]
    async fn respects_disabled_tracking_and_notifications() {
        let (_dir, store) = temp_store();
        SettingsRecord { enable_notifications: false, track_progress: false, ..Default::default() }
            .save(&store)
            .unwrap();

        let notifier = RecordingNotifier::default();
        let worker = Worker::new(store.clone(), CannedMentor::immediate(), notifier.clone());
        worker.track_hint_usage(usage(4));
        worker.show_notification("Hi", "there");

        assert!(store.hint_analytics().unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_progress_keeps_solved_flag() {
        let (_dir, store) = temp_store();
        store.mark_problem_solved("leetcode-two-sum", 1).unwrap();

        let worker = Worker::new(store.clone(), CannedMentor::immediate(), LogNotifier);
        worker.save_progress(ProblemProgress {
            problem_id: "leetcode-two-sum".into(),
            hints_used: 3,
            ..Default::default()
        });

        let saved = store.problem_progress("leetcode-two-sum").unwrap().unwrap();
        assert!(saved.solved);
        assert_eq!(saved.hints_used, 3);
    }

    #[tokio::test]
    async fn install_writes_defaults_and_menu() {
        let (_dir, store) = temp_store();
        let mut worker = Worker::new(store.clone(), CannedMentor::immediate(), LogNotifier);

        assert!(worker.on_installed().unwrap());
        assert!(!worker.on_installed().unwrap());
        assert_eq!(worker.menu().entries().len(), 1);

        let mode: Option<String> = store.get(StorageArea::Sync, "hintMode").unwrap();
        assert_eq!(mode.as_deref(), Some("click"));
    }

    #[tokio::test]
    async fn context_menu_forwards_selection_to_content() {
        let (_dir, store) = temp_store();
        let (content_port, mut content_inbox) = mailbox("content");
        let mut worker =
            Worker::new(store, CannedMentor::immediate(), LogNotifier).with_content_port(content_port);

        // Not registered yet
        assert!(!worker.on_context_menu_click(ASK_MENTOR_MENU_ID, "dp").unwrap());

        worker.on_installed().unwrap();
        assert!(worker.on_context_menu_click(ASK_MENTOR_MENU_ID, "memoization").unwrap());
        assert!(!worker.on_context_menu_click("somethingElse", "x").unwrap());

        let (request, _) = content_inbox.recv().await.unwrap().into_parts();
        assert_eq!(request, Request::AskAboutSelection { selected_text: "memoization".into() });
    }
}
