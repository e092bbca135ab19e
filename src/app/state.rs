//! Application state definitions

use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use crate::config::SettingsRecord;
use crate::messaging::PendingReply;
use crate::session::MentorSession;
use crate::stats::PopupSummary;

/// Which overlay is drawn above the widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Popup,
    Help,
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Command line showing status
    #[default]
    Normal,
    /// Accepting : commands
    Command,
    /// Typing a question for the mentor
    Question,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input (characters)
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 100;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.enter_mode(CommandMode::Command);
    }

    /// Start typing a question
    pub fn enter_question_mode(&mut self) {
        self.enter_mode(CommandMode::Question);
    }

    fn enter_mode(&mut self, mode: CommandMode) {
        self.mode = mode;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Check if we're in input mode
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, CommandMode::Command | CommandMode::Question)
    }

    /// Add to history
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(index);
        self.input = self.history[index].clone();
        self.cursor = self.char_count();
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.cursor = self.char_count();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// Toast color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
}

/// A short-lived message in the corner of the screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    /// How long a toast stays up
    pub const LIFETIME: Duration = Duration::from_secs(3);

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= Self::LIFETIME
    }
}

/// An answer on its way
#[derive(Debug)]
pub enum PendingAnswer {
    /// Widget-side canned answer behind a simulated delay
    Inline(oneshot::Receiver<String>),
    /// Answer requested from the worker
    Worker(PendingReply),
}

/// The "Ask Your Mentor" section
#[derive(Debug, Default)]
pub struct QaState {
    /// Last question asked
    pub question: Option<String>,
    /// Last answer received
    pub answer: Option<String>,
    pub pending: Option<PendingAnswer>,
}

impl QaState {
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }
}

/// The quick-look popup
#[derive(Debug, Default)]
pub struct PopupState {
    /// `getCurrentProblem` sent to the widget, not answered yet
    pub pending: Option<PendingReply>,
    pub summary: Option<PopupSummary>,
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Page session; `None` while the page is still being analyzed
    pub session: Option<MentorSession>,

    /// Mentor settings as of the last load
    pub settings: SettingsRecord,

    pub overlay: Overlay,

    /// Lines scrolled in the problem page pane
    pub page_scroll: u16,

    pub command_line: CommandLineState,

    pub qa: QaState,

    pub popup: PopupState,

    pub toasts: Vec<Toast>,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.session.is_none()
    }

    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toasts.push(Toast { message: message.into(), kind, shown_at: Instant::now() });
    }

    /// Drop toasts that have been up long enough
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        self.overlay = if self.overlay == overlay { Overlay::None } else { overlay };
    }
}
