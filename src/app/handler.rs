use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::news::{NewsError, TopicResult};
use crate::ui::layout::{self, HitTarget};
use crate::view;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tracing::{debug, info, warn};

const PAGE: isize = 10;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::NewsLoaded(results) => {
            handle_news_loaded(state, results);
            vec![]
        }
        AppEvent::NewsFailed(err) => {
            handle_news_failed(state, err);
            vec![]
        }
        AppEvent::Tick => {
            if state.is_loading {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
                state.dirty = true;
            }
            vec![]
        }
    }
}

/// Validate the selection and start a fetch. Refuses while one is already
/// in flight.
pub fn refresh(state: &mut AppState) -> Vec<Action> {
    if state.is_loading {
        debug!("refresh ignored, request already in flight");
        return vec![];
    }
    if state.selected_topics.is_empty() {
        state.set_error(NewsError::Validation.to_string());
        return vec![];
    }

    state.clear_error();
    state.set_loading(true);
    info!(topics = ?state.selected_topics, "refreshing news");
    vec![Action::FetchNews {
        topics: state.selected_topics.clone(),
    }]
}

fn handle_news_loaded(state: &mut AppState, results: Vec<TopicResult>) {
    state.set_loading(false);
    info!(sections = results.len(), "news rendered");
    state.set_news_items(results);
}

fn handle_news_failed(state: &mut AppState, err: NewsError) {
    state.set_loading(false);
    warn!(kind = err.kind(), error = %err, "news refresh failed");
    state.set_error(err.to_string());
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Mouse(mouse) => handle_mouse(state, mouse),
        CEvent::Resize(w, h) => {
            state.viewport = ratatui::layout::Rect::new(0, 0, w, h);
            clamp_scroll(state);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Modal captures all input when open
    if state.is_modal_open() {
        return handle_modal_key(state, key);
    }

    match key.code {
        KeyCode::Char('q') => return vec![Action::Quit],
        KeyCode::Char('?') => {
            state.open_modal(ModalContent::Help);
            return vec![];
        }
        KeyCode::Char('r') | KeyCode::F(5) => return refresh(state),
        KeyCode::Tab => {
            state.cycle_focus();
            return vec![];
        }
        KeyCode::BackTab => {
            state.cycle_focus_back();
            return vec![];
        }
        _ => {}
    }

    match state.focus {
        FocusPanel::Topics => handle_topics_key(state, key),
        FocusPanel::Refresh => handle_refresh_key(state, key),
        FocusPanel::News => handle_news_key(state, key),
    }
}

fn handle_modal_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('c') => {
            state.close_modal();
            vec![]
        }
        KeyCode::Char('o') => match &state.modal {
            ModalState::Open(ModalContent::Article { item, .. }) => vec![Action::OpenUrl {
                url: item.url.clone(),
            }],
            _ => vec![],
        },
        _ => vec![],
    }
}

fn handle_topics_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.topic_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.topic_cursor_down(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(checked) = state.toggle_topic_at(state.topic_cursor) {
                debug!(cursor = state.topic_cursor, checked, selected = ?state.selected_topics, "topic selection updated");
            }
        }
        _ => {}
    }
    vec![]
}

fn handle_refresh_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => refresh(state),
        _ => vec![],
    }
}

fn handle_news_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.news_cursor_up();
            keep_selection_visible(state);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.news_cursor_down();
            keep_selection_visible(state);
        }
        KeyCode::PageUp => scroll(state, -PAGE),
        KeyCode::PageDown => scroll(state, PAGE),
        KeyCode::Home => {
            state.news_cursor = 0;
            state.news_scroll = 0;
            state.dirty = true;
        }
        KeyCode::Enter => {
            if let Some((topic, item)) = state.selected_item() {
                let content = ModalContent::Article {
                    topic: topic.clone(),
                    item: item.clone(),
                };
                state.open_modal(content);
            }
        }
        KeyCode::Char('o') => {
            if let Some((_, item)) = state.selected_item() {
                return vec![Action::OpenUrl {
                    url: item.url.clone(),
                }];
            }
        }
        _ => {}
    }
    vec![]
}

fn keep_selection_visible(state: &mut AppState) {
    let vm = view::project(state);
    let Some(line) = vm.news.selected_line(state.config.ui.show_snippets) else {
        return;
    };
    let height = news_panel_height(state);
    if height == 0 {
        return;
    }
    if line < state.news_scroll {
        state.news_scroll = line;
    } else if line >= state.news_scroll + height {
        state.news_scroll = line + 1 - height;
    }
}

/// Scroll the news panel, keeping the last line at or below the bottom edge.
fn scroll(state: &mut AppState, delta: isize) {
    state.scroll_news(delta);
    clamp_scroll(state);
}

/// Pull `news_scroll` back to the last full page, matching what the panel draws.
fn clamp_scroll(state: &mut AppState) {
    let total = view::project(state)
        .news
        .lines(state.config.ui.show_snippets)
        .len();
    let max_scroll = total.saturating_sub(news_panel_height(state));
    if state.news_scroll > max_scroll {
        state.news_scroll = max_scroll;
    }
}

fn news_panel_height(state: &AppState) -> usize {
    let layout = layout::compute_layout(state.viewport);
    layout.news_list.height.saturating_sub(2) as usize
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let target = layout::hit_test(
                state.viewport,
                state.is_modal_open(),
                mouse.column,
                mouse.row,
            );
            handle_click(state, target)
        }
        MouseEventKind::ScrollUp => {
            scroll(state, -1);
            vec![]
        }
        MouseEventKind::ScrollDown => {
            scroll(state, 1);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_click(state: &mut AppState, target: HitTarget) -> Vec<Action> {
    match target {
        HitTarget::ModalClose | HitTarget::ModalBackdrop => {
            state.close_modal();
            vec![]
        }
        HitTarget::ModalBody | HitTarget::None => vec![],
        HitTarget::TopicRow(idx) => {
            if idx < state.topics.len() {
                state.focus = FocusPanel::Topics;
                state.topic_cursor = idx;
                state.toggle_topic_at(idx);
            }
            vec![]
        }
        HitTarget::RefreshButton => {
            state.focus = FocusPanel::Refresh;
            state.dirty = true;
            refresh(state)
        }
        HitTarget::NewsLine(line) => {
            let Some(index) = view::link_at_line(state, line) else {
                return vec![];
            };
            state.focus = FocusPanel::News;
            state.news_cursor = index;
            state.dirty = true;
            match state.selected_item() {
                Some((_, item)) => vec![Action::OpenUrl {
                    url: item.url.clone(),
                }],
                None => vec![],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::news::{NewsItem, Topic};
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn state() -> AppState {
        let mut s = AppState::new(AppConfig::default());
        s.viewport = Rect::new(0, 0, 100, 30);
        s
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Terminal(CEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn results() -> Vec<TopicResult> {
        vec![
            TopicResult {
                topic: Topic::from("Tech"),
                items: vec![NewsItem {
                    title: "Chips".into(),
                    url: "https://news.example/chips".into(),
                    snippet: "fast".into(),
                }],
            },
            TopicResult {
                topic: Topic::from("Crypto"),
                items: vec![NewsItem {
                    title: "Coins".into(),
                    url: "https://news.example/coins".into(),
                    snippet: "shiny".into(),
                }],
            },
        ]
    }

    #[test]
    fn refresh_without_topics_is_blocked_client_side() {
        let mut s = state();
        let actions = handle_event(&mut s, key(KeyCode::Char('r')));
        assert!(actions.is_empty());
        assert_eq!(s.error.as_deref(), Some("Please select at least one topic"));
        assert!(!s.is_loading);
    }

    #[test]
    fn refresh_with_topics_starts_one_fetch() {
        let mut s = state();
        s.set_error("stale");
        handle_event(&mut s, key(KeyCode::Char(' ')));
        handle_event(&mut s, key(KeyCode::Down));
        handle_event(&mut s, key(KeyCode::Down));
        handle_event(&mut s, key(KeyCode::Char(' ')));

        let actions = handle_event(&mut s, key(KeyCode::F(5)));
        assert_eq!(
            actions,
            vec![Action::FetchNews {
                topics: vec![Topic::from("Tech"), Topic::from("Space")]
            }]
        );
        assert!(s.is_loading);
        assert!(s.error.is_none());

        // Second refresh while loading is ignored
        assert!(handle_event(&mut s, key(KeyCode::Char('r'))).is_empty());
    }

    #[test]
    fn space_toggles_topic_on_and_off() {
        let mut s = state();
        handle_event(&mut s, key(KeyCode::Char(' ')));
        assert_eq!(s.selected_topics, vec![Topic::from("Tech")]);
        handle_event(&mut s, key(KeyCode::Char(' ')));
        assert!(s.selected_topics.is_empty());
    }

    #[test]
    fn success_stores_results_and_reenables_refresh() {
        let mut s = state();
        s.select_topic(&Topic::from("Tech"));
        refresh(&mut s);

        handle_event(&mut s, AppEvent::NewsLoaded(results()));
        assert!(!s.is_loading);
        assert_eq!(s.news_items.len(), 2);
        assert!(view::project(&s).refresh_enabled);
    }

    #[test]
    fn timeout_surfaces_message_and_reenables_refresh() {
        let mut s = state();
        s.select_topic(&Topic::from("Tech"));
        refresh(&mut s);

        handle_event(&mut s, AppEvent::NewsFailed(NewsError::Timeout));
        assert!(!s.is_loading);
        assert_eq!(s.error.as_deref(), Some("Request timeout - please try again"));

        let vm = view::project(&s);
        assert!(vm.refresh_enabled);
        assert!(!vm.loading);
        assert_eq!(refresh(&mut s).len(), 1);
    }

    #[test]
    fn server_error_message_shows_status_and_body() {
        let mut s = state();
        s.select_topic(&Topic::from("Tech"));
        refresh(&mut s);
        handle_event(
            &mut s,
            AppEvent::NewsFailed(NewsError::Server {
                status: 500,
                body: "boom".into(),
            }),
        );
        let msg = s.error.clone().unwrap();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn escape_closes_open_modal() {
        let mut s = state();
        handle_event(&mut s, key(KeyCode::Char('?')));
        assert!(s.is_modal_open());
        assert!(s.scroll_locked);

        handle_event(&mut s, key(KeyCode::Esc));
        assert!(!s.is_modal_open());
        assert!(!s.scroll_locked);
    }

    #[test]
    fn close_control_click_closes_modal() {
        let mut s = state();
        s.open_modal(ModalContent::Help);
        let m = layout::modal_layout(s.viewport);
        handle_event(&mut s, click(m.close.x + 1, m.close.y));
        assert!(!s.is_modal_open());
        assert!(!s.scroll_locked);
    }

    #[test]
    fn backdrop_click_closes_but_body_click_does_not() {
        let mut s = state();
        s.open_modal(ModalContent::Help);
        let m = layout::modal_layout(s.viewport);

        handle_event(&mut s, click(m.body.x + 2, m.body.y + 2));
        assert!(s.is_modal_open());

        handle_event(&mut s, click(0, 0));
        assert!(!s.is_modal_open());
        assert!(!s.scroll_locked);
    }

    #[test]
    fn close_key_closes_modal() {
        let mut s = state();
        s.open_modal(ModalContent::Help);
        handle_event(&mut s, key(KeyCode::Char('c')));
        assert!(!s.is_modal_open());
    }

    #[test]
    fn modal_swallows_quit_and_refresh_keys() {
        let mut s = state();
        s.select_topic(&Topic::from("Tech"));
        s.open_modal(ModalContent::Help);
        assert!(handle_event(&mut s, key(KeyCode::Char('q'))).is_empty());
        assert!(handle_event(&mut s, key(KeyCode::Char('r'))).is_empty());
        assert!(s.is_modal_open());
    }

    #[test]
    fn enter_on_news_opens_article_and_o_opens_link() {
        let mut s = state();
        s.set_news_items(results());
        s.focus = FocusPanel::News;
        handle_event(&mut s, key(KeyCode::Down));
        handle_event(&mut s, key(KeyCode::Enter));

        match &s.modal {
            ModalState::Open(ModalContent::Article { topic, item }) => {
                assert_eq!(topic.as_str(), "Crypto");
                assert_eq!(item.title, "Coins");
            }
            other => panic!("unexpected modal {:?}", other),
        }

        let actions = handle_event(&mut s, key(KeyCode::Char('o')));
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://news.example/coins".into()
            }]
        );
    }

    #[test]
    fn clicking_topic_row_toggles_it() {
        let mut s = state();
        let l = layout::compute_layout(s.viewport);
        handle_event(&mut s, click(l.topics_list.x + 3, l.topics_list.y + 2));
        assert_eq!(s.selected_topics, vec![Topic::from("Crypto")]);
        assert_eq!(s.topic_cursor, 1);
    }

    #[test]
    fn clicking_refresh_button_validates() {
        let mut s = state();
        let l = layout::compute_layout(s.viewport);
        let actions = handle_event(&mut s, click(l.refresh_button.x + 2, l.refresh_button.y + 1));
        assert!(actions.is_empty());
        assert!(s.error.is_some());
    }

    #[test]
    fn clicking_a_link_opens_it() {
        let mut s = state();
        s.set_news_items(results());
        let l = layout::compute_layout(s.viewport);
        // line 0 is the "Tech" header, line 1 the first link
        let actions = handle_event(&mut s, click(l.news_list.x + 4, l.news_list.y + 2));
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://news.example/chips".into()
            }]
        );
    }

    fn stories(n: usize) -> Vec<TopicResult> {
        vec![TopicResult {
            topic: Topic::from("Tech"),
            items: (0..n)
                .map(|i| NewsItem {
                    title: format!("Story {}", i),
                    url: format!("https://news.example/{}", i),
                    snippet: String::new(),
                })
                .collect(),
        }]
    }

    #[test]
    fn wheel_scroll_is_locked_while_modal_open() {
        let mut s = state();
        s.set_news_items(stories(60));
        let wheel = || {
            AppEvent::Terminal(CEvent::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 50,
                row: 10,
                modifiers: KeyModifiers::NONE,
            }))
        };
        s.open_modal(ModalContent::Help);
        handle_event(&mut s, wheel());
        assert_eq!(s.news_scroll, 0);

        s.close_modal();
        handle_event(&mut s, wheel());
        assert_eq!(s.news_scroll, 1);
    }

    #[test]
    fn scrolling_stops_at_the_last_line() {
        let mut s = state();
        s.set_news_items(results());
        s.focus = FocusPanel::News;
        handle_event(&mut s, key(KeyCode::PageDown));
        assert_eq!(s.news_scroll, 0);
    }

    #[test]
    fn growing_the_terminal_keeps_clicks_on_the_drawn_link() {
        let mut s = state();
        s.set_news_items(stories(60));
        s.focus = FocusPanel::News;
        for _ in 0..10 {
            handle_event(&mut s, key(KeyCode::PageDown));
        }
        assert_eq!(s.news_scroll, 35);

        handle_event(&mut s, AppEvent::Terminal(CEvent::Resize(100, 60)));
        // 61 lines in a 56-row panel
        assert_eq!(s.news_scroll, 5);

        // Line 0 is the topic header, so inner row 1 shows "Story 5"
        let l = layout::compute_layout(s.viewport);
        let actions = handle_event(&mut s, click(l.news_list.x + 5, l.news_list.y + 2));
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://news.example/5".into()
            }]
        );
    }

    #[test]
    fn ctrl_c_quits_even_with_modal() {
        let mut s = state();
        s.open_modal(ModalContent::Help);
        let actions = handle_event(
            &mut s,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert_eq!(actions, vec![Action::Quit]);
    }

    #[test]
    fn tick_advances_spinner_only_while_loading() {
        let mut s = state();
        handle_event(&mut s, AppEvent::Tick);
        assert_eq!(s.spinner_frame, 0);
        s.set_loading(true);
        handle_event(&mut s, AppEvent::Tick);
        assert_eq!(s.spinner_frame, 1);
    }
}
