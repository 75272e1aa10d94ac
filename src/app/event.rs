use crate::news::{NewsError, TopicResult};
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// The in-flight refresh finished
    NewsLoaded(Vec<TopicResult>),
    NewsFailed(NewsError),

    /// Tick for spinner animation
    Tick,
}

impl From<Result<Vec<TopicResult>, NewsError>> for AppEvent {
    fn from(result: Result<Vec<TopicResult>, NewsError>) -> Self {
        match result {
            Ok(results) => AppEvent::NewsLoaded(results),
            Err(e) => AppEvent::NewsFailed(e),
        }
    }
}
