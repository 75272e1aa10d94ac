//! Retained projection of the app state, independent of any terminal.
//!
//! Every `View` call rebuilds its part from scratch, so projecting the same
//! state twice yields an identical model.

use super::View;
use crate::app::state::ModalContent;
use crate::news::{Topic, TopicResult};

pub const EMPTY_STATE: &str = "No news found. Try selecting different topics.";
pub const TOPIC_EMPTY: &str = "No news found for this topic";
pub const NOT_FETCHED: &str = "Select topics and press r to refresh.";
pub const LOADING_TEXT: &str = "Loading news...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRow {
    pub label: String,
    pub checked: bool,
    pub focused: bool,
}

/// A rendered article link. Following it opens `target` in a separate
/// browser process; `hover` is supplementary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub index: usize,
    pub text: String,
    pub target: String,
    pub hover: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Empty,
    Links(Vec<Link>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSection {
    pub topic: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NewsView {
    #[default]
    NotFetched,
    Empty,
    Sections(Vec<TopicSection>),
}

/// One display line of the news panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsLine<'a> {
    Header(&'a str),
    Link(&'a Link),
    Snippet(&'a Link),
    Message(&'a str),
    Blank,
}

impl NewsView {
    pub fn sections(&self) -> &[TopicSection] {
        match self {
            NewsView::Sections(s) => s,
            _ => &[],
        }
    }

    pub fn lines(&self, show_snippets: bool) -> Vec<NewsLine<'_>> {
        match self {
            NewsView::NotFetched => vec![NewsLine::Message(NOT_FETCHED)],
            NewsView::Empty => vec![NewsLine::Message(EMPTY_STATE)],
            NewsView::Sections(sections) => {
                let mut lines = Vec::new();
                for (i, section) in sections.iter().enumerate() {
                    if i > 0 {
                        lines.push(NewsLine::Blank);
                    }
                    lines.push(NewsLine::Header(&section.topic));
                    match &section.body {
                        SectionBody::Empty => lines.push(NewsLine::Message(TOPIC_EMPTY)),
                        SectionBody::Links(links) => {
                            for link in links {
                                lines.push(NewsLine::Link(link));
                                if show_snippets && !link.hover.is_empty() {
                                    lines.push(NewsLine::Snippet(link));
                                }
                            }
                        }
                    }
                }
                lines
            }
        }
    }

    /// The line index of the selected link, for keeping it scrolled into view.
    pub fn selected_line(&self, show_snippets: bool) -> Option<usize> {
        self.lines(show_snippets)
            .iter()
            .position(|l| matches!(l, NewsLine::Link(link) if link.selected))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub lines: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewModel {
    pub topics: Vec<TopicRow>,
    pub news: NewsView,
    pub loading: bool,
    pub refresh_enabled: bool,
    pub error: Option<String>,
    pub modal: Option<ModalView>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            refresh_enabled: true,
            ..Self::default()
        }
    }
}

impl View for ViewModel {
    fn render_topics(&mut self, topics: &[Topic], selected: &[Topic], cursor: Option<usize>) {
        self.topics = topics
            .iter()
            .enumerate()
            .map(|(i, t)| TopicRow {
                label: t.to_string(),
                checked: selected.contains(t),
                focused: cursor == Some(i),
            })
            .collect();
    }

    fn render_news(&mut self, results: &[TopicResult], fetched: bool, cursor: Option<usize>) {
        if !fetched {
            self.news = NewsView::NotFetched;
            return;
        }
        if results.is_empty() {
            self.news = NewsView::Empty;
            return;
        }

        let mut index = 0;
        let sections = results
            .iter()
            .map(|result| {
                let body = if result.items.is_empty() {
                    SectionBody::Empty
                } else {
                    SectionBody::Links(
                        result
                            .items
                            .iter()
                            .map(|item| {
                                let link = Link {
                                    index,
                                    text: item.title.clone(),
                                    target: item.url.clone(),
                                    hover: item.snippet.clone(),
                                    selected: cursor == Some(index),
                                };
                                index += 1;
                                link
                            })
                            .collect(),
                    )
                };
                TopicSection {
                    topic: result.topic.to_string(),
                    body,
                }
            })
            .collect();
        self.news = NewsView::Sections(sections);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.refresh_enabled = !loading;
    }

    fn set_error(&mut self, message: Option<&str>) {
        self.error = message.filter(|m| !m.is_empty()).map(str::to_string);
    }

    fn set_modal_open(&mut self, content: Option<&ModalContent>) {
        self.modal = content.map(modal_view);
    }
}

fn modal_view(content: &ModalContent) -> ModalView {
    match content {
        ModalContent::Article { topic, item } => {
            let mut lines = vec![format!("Topic: {}", topic), String::new()];
            if !item.snippet.is_empty() {
                lines.push(item.snippet.clone());
                lines.push(String::new());
            }
            lines.push(item.url.clone());
            ModalView {
                title: item.title.clone(),
                lines,
                link: Some(item.url.clone()),
            }
        }
        ModalContent::Help => ModalView {
            title: "Keys".to_string(),
            lines: HELP_LINES.iter().map(|l| l.to_string()).collect(),
            link: None,
        },
    }
}

const HELP_LINES: &[&str] = &[
    "Tab / Shift+Tab   Move between topics, refresh and news",
    "Up / Down         Move the cursor",
    "Space             Toggle the topic under the cursor",
    "r / F5            Refresh news for the selected topics",
    "Enter             Toggle topic / refresh / show article details",
    "o                 Open the selected article in the browser",
    "PgUp / PgDn       Scroll the news list",
    "Esc / c           Close this window",
    "q / Ctrl+C        Quit",
];
