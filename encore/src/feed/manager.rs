use std::collections::{HashMap, hash_map};
use std::sync::Arc;

use encore_feed::FeedConfig;
use tokio::sync::Mutex as TokioMutex;

use super::{FeedHandle, FeedListener, StubListener};

/// The two browsable lists the UI can open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedKind {
    General,
    Favorites,
}

impl FeedKind {
    pub fn config(self) -> FeedConfig {
        match self {
            Self::General => FeedConfig::general(),
            Self::Favorites => FeedConfig::favorites(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::General => "All Chats",
            Self::Favorites => "Favorite Chats",
        }
    }
}

pub struct FeedManager {
    feeds: Arc<TokioMutex<HashMap<FeedKind, FeedHandle>>>,
    listener: Arc<dyn FeedListener>,
}

impl FeedManager {
    pub fn new() -> Self {
        Self::with_listener(Arc::new(StubListener))
    }

    pub fn with_listener<L>(listener: Arc<L>) -> Self
    where
        L: FeedListener + 'static,
    {
        Self {
            feeds: Arc::new(TokioMutex::new(HashMap::new())),
            listener,
        }
    }

    /// Returns the feed for `kind`, spawning its task on first use.
    pub async fn open_feed(&self, kind: FeedKind) -> FeedHandle {
        let mut feeds = self.feeds.lock().await;
        match feeds.entry(kind) {
            hash_map::Entry::Occupied(entry) => entry.get().clone(),
            hash_map::Entry::Vacant(entry) => {
                let handle = FeedHandle::new(kind, self.listener.clone());
                entry.insert(handle.clone());
                handle
            }
        }
    }

    pub async fn get_feed(&self, kind: FeedKind) -> Option<FeedHandle> {
        let feeds = self.feeds.lock().await;
        feeds.get(&kind).cloned()
    }

    /// Forgets the feed for `kind`; its task stops once the last handle drops.
    pub async fn close_feed(&self, kind: FeedKind) {
        let mut feeds = self.feeds.lock().await;
        feeds.remove(&kind);
    }

    pub async fn list_feeds(&self) -> Vec<FeedHandle> {
        let mut result = Vec::new();
        let feeds = self.feeds.lock().await;
        for feed in feeds.values() {
            result.push(feed.clone());
        }
        result
    }
}
