use async_trait::async_trait;
use encore_feed::Record;

use super::FeedKind;

/// Events emitted by a feed task as its list changes.
#[async_trait]
pub trait FeedListener: Send + Sync {
    /// The list was replaced with the first page of a fresh query.
    async fn on_feed_reset(&self, kind: FeedKind, records: Vec<Record>, has_more: bool);

    /// A follow-up page arrived after the simulated latency.
    async fn on_page_loaded(&self, kind: FeedKind, records: Vec<Record>, has_more: bool);

    /// A single record changed in place.
    async fn on_record_updated(&self, kind: FeedKind, record: Record);

    /// A record left the list.
    async fn on_record_removed(&self, kind: FeedKind, id: u32);
}

pub(super) struct StubListener;

#[async_trait]
impl FeedListener for StubListener {
    async fn on_feed_reset(&self, kind: FeedKind, records: Vec<Record>, has_more: bool) {
        _ = kind;
        _ = records;
        _ = has_more;
    }

    async fn on_page_loaded(&self, kind: FeedKind, records: Vec<Record>, has_more: bool) {
        _ = kind;
        _ = records;
        _ = has_more;
    }

    async fn on_record_updated(&self, kind: FeedKind, record: Record) {
        _ = kind;
        _ = record;
    }

    async fn on_record_removed(&self, kind: FeedKind, id: u32) {
        _ = kind;
        _ = id;
    }
}
