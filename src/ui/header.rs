use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BRAND: &str = " What's New ";
const SEPARATOR: &str = " │ ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let selected = if state.selected_topics.is_empty() {
        "no topics selected".to_string()
    } else {
        state
            .selected_topics
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let room = (area.width as usize).saturating_sub(BRAND.width() + SEPARATOR.width());

    let line = Line::from(vec![
        Span::styled(
            BRAND,
            Style::default()
                .fg(Theme::BG_DARK)
                .bg(Theme::ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(SEPARATOR, Style::default().fg(Theme::BORDER_DIM)),
        Span::styled(
            truncate(&selected, room),
            Style::default().fg(Theme::TEXT_SECONDARY),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Theme::BG_ELEVATED)),
        area,
    );
}

/// Cut `text` to at most `max` terminal columns, ending in `…` when shortened.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    if max > 0 {
        out.push('…');
    }
    out
}
