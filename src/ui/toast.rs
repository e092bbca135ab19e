//! Toasts stacked in the top-right corner

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::{Toast, ToastKind};
use crate::theme::Theme;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 4;

fn color(kind: ToastKind, theme: &Theme) -> Color {
    match kind {
        ToastKind::Success => theme.success,
        ToastKind::Info => theme.info,
        ToastKind::Warning => theme.warning,
    }
}

/// Where the `index`th toast goes, `None` once the screen is full
pub fn toast_rect(area: Rect, index: usize) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let y = area.y + 1 + index as u16 * TOAST_HEIGHT;
    if y + TOAST_HEIGHT > area.bottom() {
        return None;
    }
    Some(Rect { x: area.right().saturating_sub(width + 1), y, width, height: TOAST_HEIGHT })
}

pub fn draw(frame: &mut Frame, area: Rect, toasts: &[Toast], theme: &Theme) {
    for (index, toast) in toasts.iter().enumerate() {
        let Some(rect) = toast_rect(area, index) else {
            break;
        };
        let accent = color(toast.kind, theme);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.bg_tertiary));
        frame.render_widget(
            Paragraph::new(toast.message.as_str())
                .style(Style::default().fg(theme.fg_primary))
                .wrap(Wrap { trim: true })
                .block(block),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_stack_down_the_right_edge() {
        let area = Rect::new(0, 0, 100, 12);
        let first = toast_rect(area, 0).unwrap();
        assert_eq!(first, Rect::new(59, 1, 40, 4));
        assert_eq!(toast_rect(area, 1).unwrap().y, 5);
        assert!(toast_rect(area, 2).is_none());
    }

    #[test]
    fn success_and_info_use_theme_colors() {
        let theme = Theme::default();
        assert_eq!(color(ToastKind::Success, &theme), theme.success);
        assert_eq!(color(ToastKind::Info, &theme), theme.info);
    }
}
