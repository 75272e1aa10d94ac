use crate::config::AppConfig;
use crate::news::{NewsItem, Topic, TopicResult};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Topics,
    Refresh,
    News,
}

/// What the modal overlay is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    Article { topic: Topic, item: NewsItem },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalContent),
}

pub struct AppState {
    pub config: AppConfig,
    pub topics: Vec<Topic>,
    /// Unique, in the order the user picked them.
    pub selected_topics: Vec<Topic>,
    pub news_items: Vec<TopicResult>,
    pub has_fetched: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub modal: ModalState,
    /// Set while the modal is open; the news panel ignores scrolling.
    pub scroll_locked: bool,
    pub focus: FocusPanel,
    pub topic_cursor: usize,
    /// Index into the flattened list of all items across topics.
    pub news_cursor: usize,
    pub news_scroll: usize,
    pub viewport: Rect,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let topics = config.topics.catalog();
        Self {
            config,
            topics,
            selected_topics: Vec::new(),
            news_items: Vec::new(),
            has_fetched: false,
            is_loading: false,
            error: None,
            modal: ModalState::Closed,
            scroll_locked: false,
            focus: FocusPanel::Topics,
            topic_cursor: 0,
            news_cursor: 0,
            news_scroll: 0,
            viewport: Rect::default(),
            spinner_frame: 0,
            should_quit: false,
            dirty: true,
        }
    }

    // -- topic selection ------------------------------------------------------

    pub fn is_selected(&self, topic: &Topic) -> bool {
        self.selected_topics.contains(topic)
    }

    pub fn select_topic(&mut self, topic: &Topic) {
        if !self.is_selected(topic) {
            self.selected_topics.push(topic.clone());
            self.dirty = true;
        }
    }

    pub fn deselect_topic(&mut self, topic: &Topic) {
        let before = self.selected_topics.len();
        self.selected_topics.retain(|t| t != topic);
        if self.selected_topics.len() != before {
            self.dirty = true;
        }
    }

    /// Flip the checkbox for `topic`. Returns the new checked state.
    pub fn toggle_topic(&mut self, topic: &Topic) -> bool {
        if self.is_selected(topic) {
            self.deselect_topic(topic);
            false
        } else {
            self.select_topic(topic);
            true
        }
    }

    pub fn toggle_topic_at(&mut self, index: usize) -> Option<bool> {
        let topic = self.topics.get(index)?.clone();
        Some(self.toggle_topic(&topic))
    }

    // -- results, loading, error ----------------------------------------------

    pub fn set_news_items(&mut self, items: Vec<TopicResult>) {
        self.news_items = items;
        self.has_fetched = true;
        self.news_cursor = 0;
        self.news_scroll = 0;
        self.dirty = true;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        if !loading {
            self.spinner_frame = 0;
        }
        self.dirty = true;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.dirty = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.dirty = true;
    }

    /// All items across topics in display order.
    pub fn flat_items(&self) -> impl Iterator<Item = (&Topic, &NewsItem)> {
        self.news_items
            .iter()
            .flat_map(|r| r.items.iter().map(move |item| (&r.topic, item)))
    }

    pub fn item_count(&self) -> usize {
        self.news_items.iter().map(|r| r.items.len()).sum()
    }

    pub fn selected_item(&self) -> Option<(&Topic, &NewsItem)> {
        self.flat_items().nth(self.news_cursor)
    }

    // -- modal ------------------------------------------------------------------

    pub fn is_modal_open(&self) -> bool {
        matches!(self.modal, ModalState::Open(_))
    }

    /// Show `content`, replacing whatever the modal held, and lock scrolling.
    pub fn open_modal(&mut self, content: ModalContent) {
        self.modal = ModalState::Open(content);
        self.scroll_locked = true;
        self.dirty = true;
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.scroll_locked = false;
        self.dirty = true;
    }

    // -- navigation ---------------------------------------------------------------

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Topics => FocusPanel::Refresh,
            FocusPanel::Refresh => FocusPanel::News,
            FocusPanel::News => FocusPanel::Topics,
        };
        self.dirty = true;
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Topics => FocusPanel::News,
            FocusPanel::Refresh => FocusPanel::Topics,
            FocusPanel::News => FocusPanel::Refresh,
        };
        self.dirty = true;
    }

    pub fn topic_cursor_up(&mut self) {
        self.topic_cursor = self.topic_cursor.saturating_sub(1);
        self.dirty = true;
    }

    pub fn topic_cursor_down(&mut self) {
        if self.topic_cursor + 1 < self.topics.len() {
            self.topic_cursor += 1;
        }
        self.dirty = true;
    }

    pub fn news_cursor_up(&mut self) {
        self.news_cursor = self.news_cursor.saturating_sub(1);
        self.dirty = true;
    }

    pub fn news_cursor_down(&mut self) {
        if self.news_cursor + 1 < self.item_count() {
            self.news_cursor += 1;
        }
        self.dirty = true;
    }

    /// Scroll the news panel by `delta` lines. No-op while the modal is open.
    pub fn scroll_news(&mut self, delta: isize) {
        if self.scroll_locked {
            return;
        }
        self.news_scroll = self.news_scroll.saturating_add_signed(delta);
        self.dirty = true;
    }
}
