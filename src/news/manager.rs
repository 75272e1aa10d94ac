//! Runs refreshes off the main loop.
//!
//! Each fetch is spawned onto the runtime and reports back through the app
//! event channel. The manager keeps the token of the latest fetch so it can
//! be cancelled at shutdown.

use crate::app::event::AppEvent;
use crate::news::client::NewsSource;
use crate::news::model::Topic;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct FetchManager {
    source: Arc<dyn NewsSource>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    in_flight: Option<CancellationToken>,
}

impl FetchManager {
    pub fn new(source: Arc<dyn NewsSource>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            source,
            event_tx,
            in_flight: None,
        }
    }

    /// Spawn a fetch for `topics`. The outcome arrives as
    /// [`AppEvent::NewsLoaded`] or [`AppEvent::NewsFailed`].
    pub fn start(&mut self, topics: Vec<Topic>) {
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        let source = Arc::clone(&self.source);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_news(&topics, token).await;
            if event_tx.send(AppEvent::from(result)).is_err() {
                debug!("event loop gone, dropping fetch result");
            }
        });
    }

    /// Cancel the latest fetch, if any. Safe to call when it already finished.
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{NewsError, TopicResult};
    use async_trait::async_trait;
    use std::time::Duration;

    struct Echo;

    #[async_trait]
    impl NewsSource for Echo {
        async fn fetch_news(
            &self,
            topics: &[Topic],
            _cancel: CancellationToken,
        ) -> Result<Vec<TopicResult>, NewsError> {
            Ok(topics
                .iter()
                .map(|t| TopicResult {
                    topic: t.clone(),
                    items: vec![],
                })
                .collect())
        }
    }

    struct WaitForCancel;

    #[async_trait]
    impl NewsSource for WaitForCancel {
        async fn fetch_news(
            &self,
            _topics: &[Topic],
            cancel: CancellationToken,
        ) -> Result<Vec<TopicResult>, NewsError> {
            cancel.cancelled().await;
            Err(NewsError::Cancelled)
        }
    }

    #[tokio::test]
    async fn result_is_delivered_as_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut manager = FetchManager::new(Arc::new(Echo), tx);
        manager.start(vec![Topic::from("Tech")]);

        match rx.recv().await {
            Some(AppEvent::NewsLoaded(results)) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].topic.as_str(), "Tech");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn cancel_reaches_the_running_fetch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut manager = FetchManager::new(Arc::new(WaitForCancel), tx);
        manager.start(vec![Topic::from("Space")]);
        manager.cancel();

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("fetch should finish after cancel");
        assert!(matches!(event, Some(AppEvent::NewsFailed(NewsError::Cancelled))));
    }
}
