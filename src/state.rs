use crate::config::Config;
use crate::models::Deal;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outcome of the startup fetch. It leaves `Loading` exactly once.
#[derive(Debug, Clone)]
pub enum Feed {
    Loading,
    Ready(Vec<Deal>),
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed: Arc<RwLock<Feed>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            feed: Arc::new(RwLock::new(Feed::Loading)),
        }
    }

    pub async fn snapshot(&self) -> Feed {
        self.feed.read().await.clone()
    }

    pub async fn resolve(&self, feed: Feed) {
        *self.feed.write().await = feed;
    }
}
