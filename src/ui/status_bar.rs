use crate::app::state::AppState;
use crate::ui::theme::Theme;
use crate::view::model::LOADING_TEXT;
use crate::view::ViewModel;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Loading indicator. Blank when idle.
pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, vm: &ViewModel) {
    let line = if vm.loading {
        let glyph = SPINNER[state.spinner_frame % SPINNER.len()];
        Line::from(Span::styled(format!(" {} {}", glyph, LOADING_TEXT), Theme::loading()))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}

/// Error message, or key hints when there is no error.
pub fn render_error(frame: &mut Frame, area: Rect, vm: &ViewModel) {
    let line = match &vm.error {
        Some(message) => Line::from(vec![
            Span::styled(" ✗ ", Theme::error_message()),
            Span::styled(message.as_str(), Theme::error_message()),
        ]),
        None => Line::from(vec![
            Span::styled(" Space", Theme::key_hint()),
            Span::raw(" toggle  "),
            Span::styled("r", Theme::key_hint()),
            Span::raw(" refresh  "),
            Span::styled("Tab", Theme::key_hint()),
            Span::raw(" focus  "),
            Span::styled("?", Theme::key_hint()),
            Span::raw(" help  "),
            Span::styled("q", Theme::key_hint()),
            Span::raw(" quit"),
        ]),
    };
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
