use async_trait::async_trait;
use encore_feed::Record;
use tokio::sync::mpsc;

use crate::chat::ChatListener;
use crate::feed::{FeedKind, FeedListener};
use crate::models::{ChatMessage, PeerId};

/// Events forwarded from the service tasks to the UI subscription.
#[derive(Clone, Debug)]
pub enum UiEvent {
    FeedReset {
        kind: FeedKind,
        records: Vec<Record>,
        has_more: bool,
    },
    FeedPageLoaded {
        kind: FeedKind,
        records: Vec<Record>,
        has_more: bool,
    },
    FeedRecordUpdated {
        kind: FeedKind,
        record: Record,
    },
    FeedRecordRemoved {
        kind: FeedKind,
        id: u32,
    },
    NewMessage {
        peer_id: PeerId,
        message: ChatMessage,
    },
}

/// Bridges service listeners onto the UI event channel.
pub struct UiEventListener {
    tx: mpsc::Sender<UiEvent>,
}

impl UiEventListener {
    pub fn new(tx: mpsc::Sender<UiEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl FeedListener for UiEventListener {
    async fn on_feed_reset(&self, kind: FeedKind, records: Vec<Record>, has_more: bool) {
        if let Err(err) = self
            .tx
            .send(UiEvent::FeedReset {
                kind,
                records,
                has_more,
            })
            .await
        {
            tracing::error!(?err, "Cannot send UI event: FeedReset");
        }
    }

    async fn on_page_loaded(&self, kind: FeedKind, records: Vec<Record>, has_more: bool) {
        if let Err(err) = self
            .tx
            .send(UiEvent::FeedPageLoaded {
                kind,
                records,
                has_more,
            })
            .await
        {
            tracing::error!(?err, "Cannot send UI event: FeedPageLoaded");
        }
    }

    async fn on_record_updated(&self, kind: FeedKind, record: Record) {
        if let Err(err) = self
            .tx
            .send(UiEvent::FeedRecordUpdated { kind, record })
            .await
        {
            tracing::error!(?err, "Cannot send UI event: FeedRecordUpdated");
        }
    }

    async fn on_record_removed(&self, kind: FeedKind, id: u32) {
        if let Err(err) = self.tx.send(UiEvent::FeedRecordRemoved { kind, id }).await {
            tracing::error!(?err, "Cannot send UI event: FeedRecordRemoved");
        }
    }
}

#[async_trait]
impl ChatListener for UiEventListener {
    async fn on_message(&self, peer_id: PeerId, message: ChatMessage) {
        if let Err(err) = self.tx.send(UiEvent::NewMessage { peer_id, message }).await {
            tracing::error!(?err, "Cannot send UI event: NewMessage");
        }
    }
}
