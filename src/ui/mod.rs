//! UI rendering components

pub mod command_line;
pub mod help;
pub mod layout;
pub mod page;
pub mod popup;
pub mod toast;
pub mod widget;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::app::state::{AppState, Overlay};
use crate::session::MentorSession;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, url: &str, state: &AppState, theme: &Theme) {
    let [main, command] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let minimized = state.session.as_ref().is_some_and(MentorSession::is_minimized);
    let (page_area, widget_area) = layout::split_main(main, minimized);

    page::draw(frame, page_area, url, state.session.as_ref(), state.page_scroll, theme);
    widget::draw(frame, widget_area, state, theme);
    command_line::draw(frame, command, &state.command_line, theme);

    match state.overlay {
        Overlay::None => {}
        Overlay::Popup => popup::draw(frame, main, &state.popup, theme),
        Overlay::Help => help::draw(frame, main, theme),
    }

    toast::draw(frame, main, &state.toasts, theme);
}
