//! News backend access: wire model, error taxonomy, the HTTP client and the
//! task that runs it in the background.

pub mod client;
pub mod error;
pub mod manager;
pub mod model;

pub use client::{NewsClient, NewsSource};
pub use error::NewsError;
pub use model::{NewsItem, Topic, TopicResult};
