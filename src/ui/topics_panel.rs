use crate::app::state::{AppState, FocusPanel};
use crate::ui::theme::Theme;
use crate::view::ViewModel;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Topic checklist, one row per catalog entry.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, vm: &ViewModel) {
    let focused = state.focus == FocusPanel::Topics;
    let block = Block::default()
        .title(" Topics ")
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(if focused {
            Theme::border_type_focused()
        } else {
            Theme::border_type()
        })
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(if focused {
            Theme::panel_bg_focused()
        } else {
            Theme::panel_bg()
        });

    let lines: Vec<Line> = vm
        .topics
        .iter()
        .map(|row| {
            let (mark, style) = if row.checked {
                ("[x] ", Theme::checked())
            } else {
                ("[ ] ", Theme::unchecked())
            };
            let line = Line::from(vec![
                Span::styled(mark, style),
                Span::styled(row.label.as_str(), style),
            ]);
            if row.focused {
                line.style(Theme::cursor())
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The refresh control. Rendered disabled while a request is in flight.
pub fn render_refresh_button(frame: &mut Frame, area: Rect, state: &AppState, vm: &ViewModel) {
    let focused = state.focus == FocusPanel::Refresh;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            Theme::border_type_focused()
        } else {
            Theme::border_type()
        })
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let (label, style) = if vm.refresh_enabled {
        (" Refresh (r) ", Theme::button())
    } else {
        (" Refreshing… ", Theme::button_disabled())
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
