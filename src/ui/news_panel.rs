use crate::app::state::{AppState, FocusPanel};
use crate::ui::theme::Theme;
use crate::view::{NewsLine, ViewModel};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, vm: &ViewModel) {
    let focused = state.focus == FocusPanel::News;
    let show_snippets = state.config.ui.show_snippets;

    let title = match state.item_count() {
        0 => " News ".to_string(),
        n => format!(" News ({} articles) ", n),
    };
    let block = Block::default()
        .title(title)
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

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let news_lines = vm.news.lines(show_snippets);
    let total = news_lines.len();
    let lines: Vec<Line> = news_lines.into_iter().map(to_line).collect();

    let height = inner.height as usize;
    let max_scroll = total.saturating_sub(height);
    let scroll = state.news_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);

    if total > height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn to_line(line: NewsLine<'_>) -> Line<'_> {
    match line {
        NewsLine::Header(topic) => Line::from(Span::styled(topic, Theme::topic_header())),
        NewsLine::Link(link) => {
            let style = if link.selected {
                Theme::link_selected()
            } else {
                Theme::link()
            };
            Line::from(vec![
                Span::styled("  • ", Theme::muted()),
                Span::styled(link.text.as_str(), style),
            ])
        }
        NewsLine::Snippet(link) => Line::from(Span::styled(
            format!("    {}", link.hover),
            Theme::snippet(),
        )),
        NewsLine::Message(text) => Line::from(Span::styled(format!("  {}", text), Theme::muted())),
        NewsLine::Blank => Line::default(),
    }
}
