use crate::ui::layout::modal_layout;
use crate::ui::theme::Theme;
use crate::view::ViewModel;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Draw the modal over the whole frame, if open.
pub fn render(frame: &mut Frame, vm: &ViewModel) {
    let Some(modal) = &vm.modal else {
        return;
    };

    let layout = modal_layout(frame.area());
    let popup_area = layout.body;

    // Clear background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", modal.title))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_TEAL))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "[x]",
            Style::default()
                .fg(Theme::ACCENT_RED)
                .add_modifier(Modifier::BOLD),
        )),
        layout.close,
    );

    if inner.height < 2 || inner.width < 10 {
        return;
    }

    let body_area = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height - 1);
    let lines: Vec<Line> = modal
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(Theme::TEXT_PRIMARY))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body_area);

    // Keybinding help
    let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    let mut help = vec![
        Span::styled(" Esc", Theme::key_hint()),
        Span::styled(" Close  ", Style::default().fg(Theme::TEXT_SECONDARY)),
    ];
    if modal.link.is_some() {
        help.push(Span::styled("o", Theme::key_hint()));
        help.push(Span::styled(
            " Open in browser",
            Style::default().fg(Theme::TEXT_SECONDARY),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(help)), help_area);
}
