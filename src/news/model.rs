//! Wire types for the news endpoint.
//!
//! The request is `{"topics": [...]}`; the response is a JSON array with one
//! [`TopicResult`] per requested topic, in request order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named news category. Compared by value; serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One article as returned by the backend. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// All items returned for a single requested topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicResult {
    pub topic: Topic,
    #[serde(default)]
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Serialize)]
pub struct NewsRequest<'a> {
    pub topics: &'a [Topic],
}
