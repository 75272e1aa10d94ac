//! Named screen regions. The same rectangles are used for drawing and for
//! mapping mouse clicks back to the element under the pointer.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub topics_list: Rect,
    pub refresh_button: Rect,
    pub news_list: Rect,
    pub loading_indicator: Rect,
    pub error_message: Rect,
}

/// Popup geometry. Everything outside `body` is backdrop.
pub struct ModalLayout {
    pub body: Rect,
    pub close: Rect,
}

/// An element under a mouse click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    TopicRow(usize),
    RefreshButton,
    NewsLine(usize),
    ModalClose,
    ModalBody,
    ModalBackdrop,
    None,
}

const LEFT_PANEL_WIDTH: u16 = 26;
const LOADING_WIDTH: u16 = 18;

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: header | content | status line
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Loading + error
        ])
        .split(area);

    let header = main_chunks[0];
    let content = main_chunks[1];
    let status = main_chunks[2];

    // Horizontal: left panel | gap | news
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(LEFT_PANEL_WIDTH),
            Constraint::Min(30),
        ])
        .split(content);

    // Left panel: topic checklist | refresh button
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Topics
            Constraint::Length(3), // Refresh button
        ])
        .split(h_chunks[0]);

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LOADING_WIDTH), Constraint::Min(1)])
        .split(status);

    AppLayout {
        header,
        topics_list: left_chunks[0],
        refresh_button: left_chunks[1],
        news_list: h_chunks[1],
        loading_indicator: status_chunks[0],
        error_message: status_chunks[1],
    }
}

pub fn modal_layout(area: Rect) -> ModalLayout {
    // Center the popup: 70% width, 60% height, min 40x10
    let popup_w = (area.width * 70 / 100)
        .max(40)
        .min(area.width.saturating_sub(4));
    let popup_h = (area.height * 60 / 100)
        .max(10)
        .min(area.height.saturating_sub(2));
    let popup_x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let body = Rect::new(popup_x, popup_y, popup_w, popup_h);

    // "[x]" sits on the top border, right-aligned
    let close = Rect::new(body.right().saturating_sub(5), body.y, 3, 1);

    ModalLayout { body, close }
}

/// Resolve a click at (`column`, `row`). `modal_open` routes every click to
/// the modal, since it covers the page.
pub fn hit_test(area: Rect, modal_open: bool, column: u16, row: u16) -> HitTarget {
    let pos = Position::new(column, row);

    if modal_open {
        let modal = modal_layout(area);
        if modal.close.contains(pos) {
            return HitTarget::ModalClose;
        }
        if modal.body.contains(pos) {
            return HitTarget::ModalBody;
        }
        return HitTarget::ModalBackdrop;
    }

    let layout = compute_layout(area);
    if let Some(idx) = inner_row(layout.topics_list, pos) {
        return HitTarget::TopicRow(idx);
    }
    if layout.refresh_button.contains(pos) {
        return HitTarget::RefreshButton;
    }
    if let Some(idx) = inner_row(layout.news_list, pos) {
        return HitTarget::NewsLine(idx);
    }
    HitTarget::None
}

/// Row index inside a bordered block, or `None` when on the border or
/// outside.
fn inner_row(block: Rect, pos: Position) -> Option<usize> {
    let inner = Rect::new(
        block.x.saturating_add(1),
        block.y.saturating_add(1),
        block.width.saturating_sub(2),
        block.height.saturating_sub(2),
    );
    inner.contains(pos).then(|| (pos.y - inner.y) as usize)
}
