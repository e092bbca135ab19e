//! Application state and event handling

pub mod command;
pub mod controller;
pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::messaging::mailbox;
use crate::session::MentorSession;
use crate::storage::Store;
use crate::ui;
use crate::worker::{CannedMentor, LogNotifier, Worker};
use command::{ParseResult, parse_command};
use controller::Controller;
use input::{Action, key_to_action};
use state::{CommandMode, Overlay};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Widget behavior and state
    controller: Controller,

    /// Page analysis running off the UI thread
    loader: Option<JoinHandle<MentorSession>>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Wire up the worker and widget for one page, then take over the terminal
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config, store: Store, url: String, html: String) -> Result<Self> {
        let (worker_port, worker_inbox) = mailbox("worker");
        let (content_port, content_inbox) = mailbox("content");

        let backend = CannedMentor::new(config.hint_delay(), config.answer_delay());
        let mut worker =
            Worker::new(store.clone(), backend, LogNotifier).with_content_port(content_port.clone());
        worker.on_installed()?;
        let menu = worker.menu_handler();
        worker.spawn(worker_inbox);

        let controller = Controller::new(
            url.clone(),
            store,
            worker_port,
            (content_port, content_inbox),
            config.answer_delay(),
        )
        .with_menu(menu);

        let loader = tokio::task::spawn_blocking(move || MentorSession::from_page(&url, &html));

        let terminal = Self::setup_terminal()?;

        Ok(Self { config, controller, loader: Some(loader), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();

        loop {
            let url = self.controller.url().to_string();
            let state = &self.controller.state;
            self.terminal.draw(|frame| {
                ui::draw(frame, &url, state, &theme);
            })?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break;
                    }
                }
            }

            self.controller.tick(Instant::now());
            self.poll_loader().await;
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Hand the analyzed page to the widget once it is ready
    async fn poll_loader(&mut self) {
        if !self.loader.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        let Some(handle) = self.loader.take() else {
            return;
        };

        let session = match handle.await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Page analysis failed: {}", e);
                MentorSession::from_page(self.controller.url(), "")
            }
        };
        self.controller.load_session(session);
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.controller.state.command_line.is_input_mode() {
            return self.handle_input_key(key);
        }

        let Some(action) = key_to_action(key.code, key.modifiers) else {
            return false;
        };
        match action {
            Action::RevealHint => self.controller.reveal_next(),
            Action::Ask => self.controller.state.command_line.enter_question_mode(),
            Action::Command => self.controller.state.command_line.enter_command_mode(),
            Action::ToggleWidget if self.controller.state.overlay == Overlay::Popup => {
                self.controller.toggle_widget_from_popup()
            }
            Action::ToggleWidget => self.controller.toggle_widget(),
            Action::EditorActivity => self.controller.record_editor_activity(),
            Action::Popup => self.controller.toggle_popup(),
            Action::Help => self.controller.state.toggle_overlay(Overlay::Help),
            Action::ScrollUp => self.scroll_page(-1),
            Action::ScrollDown => self.scroll_page(1),
            Action::Back => {
                self.controller.state.overlay = Overlay::None;
                self.controller.state.command_line.message = None;
            }
            Action::Quit => return true,
        }
        false
    }

    fn scroll_page(&mut self, delta: i32) {
        let scroll = &mut self.controller.state.page_scroll;
        *scroll = scroll.saturating_add_signed(delta as i16);
    }

    /// Edit the command line or question box
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        let line = &mut self.controller.state.command_line;

        match key.code {
            KeyCode::Esc => line.exit_input_mode(),
            KeyCode::Enter => {
                let mode = line.mode;
                let input = std::mem::take(&mut line.input);
                line.exit_input_mode();

                match mode {
                    CommandMode::Command => {
                        line.add_to_history(input.clone());
                        return self.run_command(&input);
                    }
                    CommandMode::Question => self.controller.ask(&input),
                    CommandMode::Normal => {}
                }
            }
            KeyCode::Backspace if line.input.is_empty() => line.exit_input_mode(),
            KeyCode::Backspace => line.delete_char(),
            KeyCode::Left => line.move_left(),
            KeyCode::Right => line.move_right(),
            KeyCode::Up if line.mode == CommandMode::Command => line.history_up(),
            KeyCode::Down if line.mode == CommandMode::Command => line.history_down(),
            KeyCode::Char(c) => line.insert_char(c),
            _ => {}
        }
        false
    }

    fn run_command(&mut self, input: &str) -> bool {
        match parse_command(input) {
            ParseResult::Ok(command) => self.controller.execute(command),
            ParseResult::UnknownCommand(name) => {
                self.controller.state.command_line.set_error(format!("Unknown command: {}", name));
                false
            }
            ParseResult::MissingArgument(name) => {
                self.controller
                    .state
                    .command_line
                    .set_error(format!(":{} needs an argument", name));
                false
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
