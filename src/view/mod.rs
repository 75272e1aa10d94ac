//! Renderer: projects [`AppState`] onto a [`View`].
//!
//! The state and handler layer only ever talks to the `View` trait, so it can
//! be exercised without a terminal. [`ViewModel`] is the implementation the
//! ratatui widgets in `crate::ui` draw from.

pub mod model;

use crate::app::state::{AppState, FocusPanel, ModalContent, ModalState};
use crate::news::{Topic, TopicResult};

pub use model::{Link, NewsLine, NewsView, SectionBody, TopicSection, ViewModel};

pub trait View {
    /// Rebuild the topic checklist. `cursor` is the highlighted row, if the
    /// checklist has focus.
    fn render_topics(&mut self, topics: &[Topic], selected: &[Topic], cursor: Option<usize>);

    /// Rebuild the result sections. `fetched` is false before the first
    /// successful refresh.
    fn render_news(&mut self, results: &[TopicResult], fetched: bool, cursor: Option<usize>);

    /// Show or hide the loading indicator. Also gates the refresh control.
    fn set_loading(&mut self, loading: bool);

    /// Show `message` in the error region, or clear it with `None`.
    fn set_error(&mut self, message: Option<&str>);

    fn set_modal_open(&mut self, content: Option<&ModalContent>);
}

/// Push the whole state into `view`.
pub fn sync(view: &mut impl View, state: &AppState) {
    let topic_cursor = (state.focus == FocusPanel::Topics).then_some(state.topic_cursor);
    let news_cursor = (state.focus == FocusPanel::News).then_some(state.news_cursor);

    view.render_topics(&state.topics, &state.selected_topics, topic_cursor);
    view.render_news(&state.news_items, state.has_fetched, news_cursor);
    view.set_loading(state.is_loading);
    view.set_error(state.error.as_deref());
    let modal = match &state.modal {
        ModalState::Open(content) => Some(content),
        ModalState::Closed => None,
    };
    view.set_modal_open(modal);
}

/// Project `state` into a fresh [`ViewModel`].
pub fn project(state: &AppState) -> ViewModel {
    let mut vm = ViewModel::new();
    sync(&mut vm, state);
    vm
}

/// The article index shown on news panel line `line` (0-based from the top
/// of the panel, before scrolling), if that line is a link.
pub fn link_at_line(state: &AppState, line: usize) -> Option<usize> {
    let vm = project(state);
    let lines = vm.news.lines(state.config.ui.show_snippets);
    match lines.get(line + state.news_scroll) {
        Some(NewsLine::Link(link)) | Some(NewsLine::Snippet(link)) => Some(link.index),
        _ => None,
    }
}
