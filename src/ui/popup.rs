//! Quick-look popup overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::layout::{centered_rect, progress_bar};
use crate::app::state::PopupState;
use crate::stats::PopupSummary;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, popup: &PopupState, theme: &Theme) {
    let area = centered_rect(50, 60, area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            " Coding Mentor ",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match &popup.summary {
        Some(summary) => summary_lines(summary, theme, inner.width as usize),
        None => vec![Line::from(Span::styled("Loading...", Style::default().fg(theme.fg_muted)))],
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn row(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(theme.fg_muted)),
        Span::styled(value, Style::default().fg(theme.fg_primary)),
    ])
}

fn on_off(flag: bool) -> String {
    if flag { "on".to_string() } else { "off".to_string() }
}

/// Popup body for a loaded summary
pub fn summary_lines(summary: &PopupSummary, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let settings = &summary.settings;
    let bar_width = width.saturating_sub(8).clamp(4, 30);

    vec![
        row("Platform", summary.platform.clone(), theme),
        row("Problem", summary.active_problem.clone(), theme),
        Line::from(""),
        row("Hints today", summary.hints_today.to_string(), theme),
        row("Solved", summary.problems_solved.to_string(), theme),
        Line::from(""),
        Line::from(Span::styled("Learning Progress", Style::default().fg(theme.accent_secondary))),
        Line::from(vec![
            Span::styled(
                progress_bar(summary.learning_progress, bar_width),
                Style::default().fg(theme.success),
            ),
            Span::styled(
                format!(" {:.0}%", summary.learning_progress),
                Style::default().fg(theme.fg_muted),
            ),
        ]),
        Line::from(Span::styled(
            summary.progress_message(),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        row("Hint mode", settings.hint_mode.to_string(), theme),
        row("Timed delay", format!("{}s", settings.timed_delay), theme),
        row("Notifications", on_off(settings.enable_notifications), theme),
        row("Track progress", on_off(settings.track_progress), theme),
        Line::from(""),
        Line::from(Span::styled("m minimize widget   p/Esc close", Style::default().fg(theme.fg_muted))),
    ]
}
