//! The problem page pane behind the widget

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::session::MentorSession;
use crate::theme::Theme;

/// Draw the page as the extractor saw it
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    url: &str,
    session: Option<&MentorSession>,
    scroll: u16,
    theme: &Theme,
) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", url), Style::default().fg(theme.fg_muted)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let lines = match session {
        Some(session) => page_lines(session, theme, width),
        None => vec![Line::from(Span::styled("Reading page...", Style::default().fg(theme.fg_muted)))],
    };

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// Title, metadata and statement of the page's problem
pub fn page_lines(session: &MentorSession, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let record = session.record();
    if !session.is_detected() {
        return vec![Line::from(Span::styled(
            "No problem statement found on this page.",
            Style::default().fg(theme.fg_muted),
        ))];
    }

    let mut lines = vec![Line::from(Span::styled(
        record.title.clone(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    ))];

    let mut meta = vec![Span::styled(record.platform.to_string(), Style::default().fg(theme.info))];
    if !record.difficulty.is_empty() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(record.difficulty.clone(), Style::default().fg(theme.warning)));
    }
    lines.push(Line::from(meta));

    if !record.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            record.tags.join(" · "),
            Style::default().fg(theme.accent_secondary),
        )));
    }
    lines.push(Line::from(""));

    for paragraph in record.description.lines() {
        if paragraph.trim().is_empty() {
            lines.push(Line::from(""));
            continue;
        }
        for line in textwrap::wrap(paragraph, width.max(10)) {
            lines.push(Line::from(Span::styled(
                line.into_owned(),
                Style::default().fg(theme.fg_secondary),
            )));
        }
    }
    lines
}
