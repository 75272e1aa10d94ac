use crate::news::Topic;

/// Side effects the main loop performs after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchNews { topics: Vec<Topic> },
    OpenUrl { url: String },
    Quit,
}
