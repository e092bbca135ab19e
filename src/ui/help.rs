//! Key binding reference overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;
use crate::theme::Theme;

const KEYS: &[(&str, &str)] = &[
    ("n / Enter", "Unlock the next hint"),
    ("i", "Ask your mentor a question"),
    ("a", "Record an editor attempt"),
    ("m / Space", "Minimize or restore the widget"),
    ("p", "Popup with today's stats (m there minimizes)"),
    ("j / k", "Scroll the problem"),
    (":", "Command line"),
    ("?", "This help"),
    ("q", "Quit"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":hint", "Unlock the next hint"),
    (":ask <question>", "Ask your mentor"),
    (":select <text>", "Ask about selected text"),
    (":solved", "Mark the problem solved"),
    (":toggle", "Minimize or restore"),
    (":popup", "Show stats"),
    (":q", "Quit"),
];

pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let area = centered_rect(60, 70, area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Help ", Style::default().fg(theme.accent_primary)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(help_lines(theme)), inner);
}

fn section(title: &str, entries: &[(&str, &str)], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(entries.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", key), Style::default().fg(theme.info)),
            Span::styled(what.to_string(), Style::default().fg(theme.fg_secondary)),
        ])
    }));
    lines
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = section("Keys", KEYS, theme);
    lines.push(Line::from(""));
    lines.extend(section("Commands", COMMANDS, theme));
    lines
}
