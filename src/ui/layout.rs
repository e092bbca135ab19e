//! Layout utilities

use ratatui::layout::{Constraint, Layout, Rect};

/// Narrowest the widget panel gets
pub const WIDGET_MIN_WIDTH: u16 = 36;

/// Widest the widget panel gets
pub const WIDGET_MAX_WIDTH: u16 = 56;

/// Height of the minimized widget (header only)
pub const MINIMIZED_HEIGHT: u16 = 3;

/// Split the main area into the page pane and the widget panel on the right
///
/// A minimized widget only takes a header-sized corner, so the page keeps the
/// full width.
pub fn split_main(area: Rect, minimized: bool) -> (Rect, Rect) {
    let width = (area.width * 2 / 5).clamp(WIDGET_MIN_WIDTH, WIDGET_MAX_WIDTH).min(area.width);
    let widget_x = area.x + area.width - width;

    if minimized {
        let height = MINIMIZED_HEIGHT.min(area.height);
        return (area, Rect::new(widget_x, area.y, width, height));
    }

    let page = Rect::new(area.x, area.y, area.width - width, area.height);
    (page, Rect::new(widget_x, area.y, width, area.height))
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// A text progress bar, `width` cells wide
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_sits_on_the_right() {
        let area = Rect::new(0, 0, 120, 40);
        let (page, widget) = split_main(area, false);
        assert_eq!(widget.width, 48);
        assert_eq!(page.width + widget.width, 120);
        assert_eq!(widget.x, 72);
        assert_eq!(widget.height, 40);
    }

    #[test]
    fn narrow_terminal_keeps_minimum_widget() {
        let (page, widget) = split_main(Rect::new(0, 0, 60, 20), false);
        assert_eq!(widget.width, WIDGET_MIN_WIDTH);
        assert_eq!(page.width, 24);
    }

    #[test]
    fn minimized_widget_leaves_page_whole() {
        let area = Rect::new(0, 0, 100, 30);
        let (page, widget) = split_main(area, true);
        assert_eq!(page, area);
        assert_eq!(widget.height, MINIMIZED_HEIGHT);
    }

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert!(inner.x >= 20 && inner.right() <= 80);
        assert_eq!(inner.height, 20);
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(100.0, 4), "████");
        assert_eq!(progress_bar(250.0, 4), "████");
    }
}
