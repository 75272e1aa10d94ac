//! HTTP client for the news endpoint.
//!
//! A refresh is a single POST. The call races three things: the response,
//! the client-side timeout and the caller's [`CancellationToken`]. Whichever
//! finishes first wins; the losing request future is dropped, which aborts
//! the underlying connection.

use crate::news::error::{map_reqwest_error, NewsError};
use crate::news::model::{NewsRequest, Topic, TopicResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default endpoint of the local backend.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/get_news";

/// The backend gives up after 60 s; waiting a little longer lets its own
/// timeout response reach us first.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(65_000);

/// Something that can turn a topic list into news results.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(
        &self,
        topics: &[Topic],
        cancel: CancellationToken,
    ) -> Result<Vec<TopicResult>, NewsError>;
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl NewsClient {
    pub fn new(settings: ClientSettings) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("whatsnew/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NewsError::Unexpected(e.to_string()))?;
        Ok(Self { http, settings })
    }

    async fn send(&self, topics: &[Topic]) -> Result<Vec<TopicResult>, NewsError> {
        let response = self
            .http
            .post(&self.settings.endpoint)
            .json(&NewsRequest { topics })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "news endpoint returned an error status");
            return Err(NewsError::Server {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<TopicResult>>()
            .await
            .map_err(map_reqwest_error)
    }
}

#[async_trait]
impl NewsSource for NewsClient {
    async fn fetch_news(
        &self,
        topics: &[Topic],
        cancel: CancellationToken,
    ) -> Result<Vec<TopicResult>, NewsError> {
        if topics.is_empty() {
            return Err(NewsError::Validation);
        }

        debug!(endpoint = %self.settings.endpoint, count = topics.len(), "requesting news");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(NewsError::Cancelled),
            _ = tokio::time::sleep(self.settings.timeout) => {
                warn!(timeout_ms = self.settings.timeout.as_millis() as u64, "news request timed out");
                cancel.cancel();
                Err(NewsError::Timeout)
            }
            result = self.send(topics) => result,
        };

        if let Ok(ref results) = result {
            info!(topics = results.len(), "news request succeeded");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::model::NewsItem;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> NewsClient {
        NewsClient::new(ClientSettings {
            endpoint: format!("{}/api/get_news", server.uri()),
            timeout,
        })
        .unwrap()
    }

    fn topics(names: &[&str]) -> Vec<Topic> {
        names.iter().map(|n| Topic::from(*n)).collect()
    }

    #[tokio::test]
    async fn posts_topics_and_returns_results_unchanged() {
        let server = MockServer::start().await;
        let payload = serde_json::json!([
            {"topic": "Tech", "items": [{"title": "Chips", "url": "https://a.example/1", "snippet": "fast"}]},
            {"topic": "Crypto", "items": []}
        ]);
        Mock::given(method("POST"))
            .and(path("/api/get_news"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"topics": ["Tech", "Crypto"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, DEFAULT_TIMEOUT);
        let results = client
            .fetch_news(&topics(&["Tech", "Crypto"]), CancellationToken::new())
            .await
            .expect("fetch ok");

        assert_eq!(
            results,
            vec![
                TopicResult {
                    topic: Topic::from("Tech"),
                    items: vec![NewsItem {
                        title: "Chips".into(),
                        url: "https://a.example/1".into(),
                        snippet: "fast".into(),
                    }],
                },
                TopicResult {
                    topic: Topic::from("Crypto"),
                    items: vec![],
                },
            ]
        );
    }

    #[tokio::test]
    async fn non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server, DEFAULT_TIMEOUT);
        let err = client
            .fetch_news(&topics(&["Tech"]), CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            NewsError::Server {
                status: 500,
                body: "boom".into()
            }
        );
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[tokio::test]
    async fn slow_response_times_out_and_cancels_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(serde_json::json!([])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(50));
        let token = CancellationToken::new();
        let err = client
            .fetch_news(&topics(&["Space"]), token.clone())
            .await
            .unwrap_err();

        assert_eq!(err, NewsError::Timeout);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(serde_json::json!([])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, DEFAULT_TIMEOUT);
        let token = CancellationToken::new();
        token.cancel();
        let err = client
            .fetch_news(&topics(&["Space"]), token)
            .await
            .unwrap_err();

        assert_eq!(err, NewsError::Cancelled);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = NewsClient::new(ClientSettings {
            endpoint: format!("http://127.0.0.1:{}/api/get_news", port),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let err = client
            .fetch_news(&topics(&["Tech"]), CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err, NewsError::NetworkUnreachable);
    }

    #[tokio::test]
    async fn malformed_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, DEFAULT_TIMEOUT);
        let err = client
            .fetch_news(&topics(&["Tech"]), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, NewsError::Unexpected(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn empty_topics_never_touch_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, DEFAULT_TIMEOUT);
        let err = client
            .fetch_news(&[], CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err, NewsError::Validation);
    }
}
