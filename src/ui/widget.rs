//! The mentor widget panel
//!
//! Renders one of three states: loading, problem not detected, or the full
//! hint view with stats, hint cards and the question box.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::progress_bar;
use crate::app::state::{AppState, QaState};
use crate::hints::HINT_LEVELS;
use crate::session::MentorSession;
use crate::theme::Theme;

const TITLE: &str = " 🧠 Coding Mentor ";

/// Draw the widget into `area`
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let minimized = state.session.as_ref().is_some_and(MentorSession::is_minimized);
    let toggle = if minimized { " [+] " } else { " [−] " };

    let block = Block::default()
        .title(Line::from(Span::styled(
            TITLE,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )))
        .title(Line::from(Span::styled(toggle, Style::default().fg(theme.fg_muted))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if minimized {
        return;
    }

    let width = inner.width.saturating_sub(1) as usize;
    let lines = match &state.session {
        None => loading_lines(theme),
        Some(session) if !session.is_detected() => not_detected_lines(theme, width),
        Some(session) => problem_lines(session, &state.qa, theme, width),
    };

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg_primary)), inner);
}

fn status_line(text: String, color: ratatui::style::Color, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(text, Style::default().fg(theme.fg_secondary)),
    ])
}

fn muted(text: impl Into<String>, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(theme.fg_muted)))
}

fn wrapped(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    textwrap::wrap(text, width.max(10))
        .into_iter()
        .map(|l| Line::from(Span::styled(l.into_owned(), style)))
        .collect()
}

fn loading_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        status_line("Loading...".to_string(), theme.warning, theme),
        Line::from(""),
        muted("Please wait while your mentor analyzes the problem.", theme),
    ]
}

fn not_detected_lines(theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        status_line("Problem not detected on this page.".to_string(), theme.warning, theme),
        Line::from(""),
    ];
    lines.extend(wrapped(
        "The mentor widget is active but could not find a problem statement on this page. \
         Please navigate to a valid problem URL on LeetCode, Codeforces, or HackerRank.",
        width,
        Style::default().fg(theme.fg_muted),
    ));
    lines
}

/// Lines of the full hint view
pub fn problem_lines(
    session: &MentorSession,
    qa: &QaState,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let progression = session.progression();
    let mut lines = vec![status_line(
        format!("Analyzing problem: {}", session.record().title),
        theme.success,
        theme,
    )];

    let percent = progression.progress_percent();
    let bar_width = width.saturating_sub(6).max(4);
    lines.push(Line::from(vec![
        Span::styled(progress_bar(percent as f64, bar_width), Style::default().fg(theme.accent_primary)),
        Span::styled(format!(" {:>3}%", percent), Style::default().fg(theme.fg_muted)),
    ]));

    lines.push(Line::from(vec![
        Span::styled(
            format!("{}", progression.hints_used()),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Hints Used   ", Style::default().fg(theme.fg_muted)),
        Span::styled(
            format!("{}m", session.time_spent_minutes()),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Time Spent   ", Style::default().fg(theme.fg_muted)),
        Span::styled(
            format!("{}", progression.attempts()),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Attempts", Style::default().fg(theme.fg_muted)),
    ]));
    lines.push(Line::from(""));

    lines.extend(hint_lines(session, theme, width));
    lines.push(Line::from(""));

    let action_style = if progression.is_complete() {
        Style::default().fg(theme.fg_muted)
    } else {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(format!(" [n] {} ", session.next_button_label()), action_style),
        Span::raw(" "),
        Span::styled(" [p] Stats ", Style::default().fg(theme.fg_secondary).bg(theme.bg_tertiary)),
    ]));
    lines.push(Line::from(""));

    lines.extend(qa_lines(qa, theme, width));
    lines
}

/// Hint cards; before the first reveal only the first card is shown
pub fn hint_lines(session: &MentorSession, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let used = session.progression().hints_used() as usize;
    let shown = if used == 0 { 1 } else { HINT_LEVELS };
    let mut lines = Vec::new();

    for (index, hint) in session.hints().iter().take(shown).enumerate() {
        let unlocked = session.is_unlocked(index);
        let badge_style = if unlocked {
            Style::default().fg(theme.bg_primary).bg(theme.hint_unlocked).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.hint_locked).bg(theme.bg_tertiary)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" Hint {} ", index + 1), badge_style),
            Span::styled(format!(" {}", hint.title), Style::default().fg(theme.fg_secondary)),
        ]));

        let content = if unlocked {
            hint.content.as_str()
        } else if used == 0 {
            "Press n (\"Get First Hint\") to start your guided journey"
        } else {
            "Unlock previous hints to see this one"
        };
        let style = if unlocked {
            Style::default().fg(theme.fg_primary)
        } else {
            Style::default().fg(theme.hint_locked).add_modifier(Modifier::ITALIC)
        };
        lines.extend(wrapped(content, width, style));
    }
    lines
}

/// The "Ask Your Mentor" section
pub fn qa_lines(qa: &QaState, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Ask Your Mentor",
        Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
    ))];

    match &qa.question {
        Some(question) => lines.extend(wrapped(
            &format!("You: {}", question),
            width,
            Style::default().fg(theme.fg_secondary),
        )),
        None => lines.push(muted("[i] e.g., Why is my solution O(n²)?", theme)),
    }

    if qa.is_thinking() {
        lines.push(Line::from(Span::styled("⠋ Thinking...", Style::default().fg(theme.info))));
    } else if let Some(answer) = &qa.answer {
        lines.extend(wrapped(answer, width, Style::default().fg(theme.fg_primary)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Platform, ProblemRecord};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> MentorSession {
        let record = ProblemRecord {
            title: "Two Sum".into(),
            description: "Return indices of two numbers that add up to target.".into(),
            platform: Platform::LeetCode,
            ..Default::default()
        };
        MentorSession::new(
            "https://leetcode.com/problems/two-sum/",
            record,
            &mut StdRng::seed_from_u64(3),
        )
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn fresh_session_shows_first_card_only() {
        let lines = hint_lines(&session(), &Theme::default(), 40);
        let rendered = text(&lines);
        assert!(rendered.contains("Hint 1"));
        assert!(!rendered.contains("Hint 2"));
        assert!(rendered.contains("guided journey"));
    }

    #[test]
    fn revealed_hint_shows_content_and_locks_rest() {
        let mut session = session();
        session.reveal_next();
        let rendered = text(&hint_lines(&session, &Theme::default(), 1000));

        assert!(rendered.contains(&session.hints()[0].content));
        assert!(!rendered.contains(&session.hints()[1].content));
        assert_eq!(rendered.matches("Unlock previous hints to see this one").count(), 3);
    }

    #[test]
    fn full_view_has_status_and_action() {
        let rendered = text(&problem_lines(&session(), &QaState::default(), &Theme::default(), 40));
        assert!(rendered.contains("Analyzing problem: Two Sum"));
        assert!(rendered.contains("Get First Hint"));
        assert!(rendered.contains("0%"));
    }

    #[test]
    fn qa_shows_thinking_then_answer() {
        let theme = Theme::default();
        let (_tx, rx) = tokio::sync::oneshot::channel();
        let thinking = QaState {
            question: Some("How do I go faster?".into()),
            answer: None,
            pending: Some(crate::app::state::PendingAnswer::Inline(rx)),
        };
        assert!(text(&qa_lines(&thinking, &theme, 40)).contains("Thinking..."));

        let answered =
            QaState { question: Some("q".into()), answer: Some("Use a heap.".into()), pending: None };
        let rendered = text(&qa_lines(&answered, &theme, 40));
        assert!(rendered.contains("You: q"));
        assert!(rendered.contains("Use a heap."));
    }

    #[test]
    fn not_detected_message_wraps() {
        let lines = not_detected_lines(&Theme::default(), 30);
        assert!(lines.len() > 3);
        assert!(text(&lines).contains("Problem not detected"));
    }
}
