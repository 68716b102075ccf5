use std::sync::Arc;
use std::time::Duration;

use encore::feed::{FeedHandle, FeedKind, FeedManager};
use encore::ui::{UiEvent, UiEventListener};
use encore_feed::Record;
use tokio::sync::mpsc;
use tokio::time::advance;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("encore=debug")
        .try_init();
}

fn listener() -> (Arc<UiEventListener>, mpsc::Receiver<UiEvent>) {
    let (tx, rx) = mpsc::channel(100);
    (Arc::new(UiEventListener::new(tx)), rx)
}

fn record_ids(records: &[Record]) -> Vec<u32> {
    records.iter().map(|record| record.id).collect()
}

#[tokio::test(start_paused = true)]
async fn test_refresh_delivers_first_page() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    // Act
    feed.refresh().await.expect("refresh failed");
    // Assert
    let event = rx.recv().await.expect("no reset event");
    match event {
        UiEvent::FeedReset {
            kind,
            records,
            has_more,
        } => {
            assert_eq!(kind, FeedKind::General);
            assert_eq!(record_ids(&records), vec![1, 2, 3, 4, 5]);
            assert!(has_more);
        }
        other => panic!("expected FeedReset, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_next_page_waits_full_latency() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");

    // Act: request the next page and let the task arm its timer
    feed.load_next_page().await.expect("load_next_page failed");
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert!(snapshot.loading, "a page load should be pending");

    // Assert: nothing arrives below the full latency
    advance(Duration::from_millis(499)).await;
    assert!(
        rx.try_recv().is_err(),
        "page arrived before the latency elapsed"
    );

    advance(Duration::from_millis(2)).await;
    let event = rx.recv().await.expect("no page event");
    match event {
        UiEvent::FeedPageLoaded {
            kind,
            records,
            has_more,
        } => {
            assert_eq!(kind, FeedKind::General);
            assert_eq!(record_ids(&records), vec![6, 7, 8, 9, 10]);
            assert!(has_more);
        }
        other => panic!("expected FeedPageLoaded, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_rapid_page_requests_coalesce() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");

    // Act: hammer the handle while the first load is still pending
    feed.load_next_page().await.expect("load_next_page failed");
    feed.load_next_page().await.expect("load_next_page failed");
    feed.load_next_page().await.expect("load_next_page failed");
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert!(snapshot.loading);

    advance(Duration::from_millis(501)).await;

    // Assert: exactly one page was scheduled
    let event = rx.recv().await.expect("no page event");
    assert!(matches!(event, UiEvent::FeedPageLoaded { .. }));
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert_eq!(snapshot.page, 2);
    assert!(!snapshot.loading);
    assert!(rx.try_recv().is_err(), "only one page should have loaded");
}

#[tokio::test(start_paused = true)]
async fn test_search_cancels_pending_load() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");

    feed.load_next_page().await.expect("load_next_page failed");
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert!(snapshot.loading);

    // Act: searching resets the list right away
    feed.search("IU").await.expect("search failed");
    let event = rx.recv().await.expect("no reset event");
    match event {
        UiEvent::FeedReset { records, .. } => {
            // IU occupies table slots 2 and 4 on the first page.
            assert_eq!(record_ids(&records), vec![2, 4]);
        }
        other => panic!("expected FeedReset, got {:?}", other),
    }

    // Assert: the cancelled page never arrives
    advance(Duration::from_millis(600)).await;
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert_eq!(snapshot.page, 1);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.query, "IU");
    assert!(rx.try_recv().is_err(), "cancelled page load still fired");
}

#[tokio::test(start_paused = true)]
async fn test_feed_ends_after_ceiling() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");

    // Act: drain pages 2 through 6; all of them are full
    for page in 2..=6u32 {
        feed.load_next_page().await.expect("load_next_page failed");
        let _ = feed.snapshot().await.expect("snapshot failed");
        advance(Duration::from_millis(501)).await;
        let event = rx.recv().await.expect("no page event");
        match event {
            UiEvent::FeedPageLoaded {
                records, has_more, ..
            } => {
                assert_eq!(records.len(), 5, "page {page}");
                assert!(has_more, "page {page}");
            }
            other => panic!("expected FeedPageLoaded, got {:?}", other),
        }
    }

    // The page past the ceiling is empty and closes the feed
    feed.load_next_page().await.expect("load_next_page failed");
    let _ = feed.snapshot().await.expect("snapshot failed");
    advance(Duration::from_millis(501)).await;
    let event = rx.recv().await.expect("no page event");
    match event {
        UiEvent::FeedPageLoaded {
            records, has_more, ..
        } => {
            assert!(records.is_empty());
            assert!(!has_more);
        }
        other => panic!("expected FeedPageLoaded, got {:?}", other),
    }

    // Assert: further requests are ignored outright
    feed.load_next_page().await.expect("load_next_page failed");
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert!(!snapshot.loading);
    assert_eq!(snapshot.page, 7);
    assert_eq!(snapshot.records.len(), 30);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_favorite_updates_record() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");

    // Act: id 1 is not a favorite by default
    feed.toggle_favorite(1).await.expect("toggle failed");
    let event = rx.recv().await.expect("no update event");
    match event {
        UiEvent::FeedRecordUpdated { kind, record } => {
            assert_eq!(kind, FeedKind::General);
            assert_eq!(record.id, 1);
            assert!(record.favorite);
        }
        other => panic!("expected FeedRecordUpdated, got {:?}", other),
    }

    // Act: toggling again flips it back
    feed.toggle_favorite(1).await.expect("toggle failed");
    let event = rx.recv().await.expect("no update event");
    match event {
        UiEvent::FeedRecordUpdated { record, .. } => {
            assert!(!record.favorite);
        }
        other => panic!("expected FeedRecordUpdated, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_favorites_feed_unstar_removes() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::Favorites).await;
    feed.refresh().await.expect("refresh failed");
    let event = rx.recv().await.expect("no reset event");
    match event {
        UiEvent::FeedReset {
            kind,
            records,
            has_more,
        } => {
            assert_eq!(kind, FeedKind::Favorites);
            assert_eq!(record_ids(&records), vec![3]);
            assert!(has_more);
        }
        other => panic!("expected FeedReset, got {:?}", other),
    }

    feed.load_next_page().await.expect("load_next_page failed");
    let _ = feed.snapshot().await.expect("snapshot failed");
    advance(Duration::from_millis(501)).await;
    let event = rx.recv().await.expect("no page event");
    match event {
        UiEvent::FeedPageLoaded { records, .. } => {
            assert_eq!(record_ids(&records), vec![6, 9]);
        }
        other => panic!("expected FeedPageLoaded, got {:?}", other),
    }

    // Act: unstarring inside the favorites list removes the record
    feed.toggle_favorite(3).await.expect("toggle failed");
    let event = rx.recv().await.expect("no removal event");
    match event {
        UiEvent::FeedRecordRemoved { kind, id } => {
            assert_eq!(kind, FeedKind::Favorites);
            assert_eq!(id, 3);
        }
        other => panic!("expected FeedRecordRemoved, got {:?}", other),
    }
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert_eq!(record_ids(&snapshot.records), vec![6, 9]);
}

#[tokio::test(start_paused = true)]
async fn test_delete_record() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");

    // Act
    feed.delete_record(2).await.expect("delete failed");
    let event = rx.recv().await.expect("no removal event");
    match event {
        UiEvent::FeedRecordRemoved { id, .. } => assert_eq!(id, 2),
        other => panic!("expected FeedRecordRemoved, got {:?}", other),
    }

    // Deleting an unknown id is a no-op
    feed.delete_record(99).await.expect("delete failed");
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert_eq!(record_ids(&snapshot.records), vec![1, 3, 4, 5]);
    assert!(rx.try_recv().is_err(), "no event expected for unknown id");
}

#[tokio::test(start_paused = true)]
async fn test_handle_clone_shares_task() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feeds = FeedManager::with_listener(listener);
    let feed = feeds.open_feed(FeedKind::General).await;
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert!(snapshot.records.is_empty());
    assert_eq!(snapshot.page, 0);
    assert!(snapshot.has_more);

    // Act: the task must outlive the original handle
    let cloned = feed.clone();
    drop(feed);
    cloned.refresh().await.expect("refresh failed");

    // Assert
    let event = rx.recv().await.expect("no reset event");
    assert!(matches!(event, UiEvent::FeedReset { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_load() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let feed = FeedHandle::new(FeedKind::General, listener);
    feed.refresh().await.expect("refresh failed");
    let _ = rx.recv().await.expect("no reset event");
    feed.load_next_page().await.expect("load_next_page failed");
    let snapshot = feed.snapshot().await.expect("snapshot failed");
    assert!(snapshot.loading);

    // Act: the last handle goes away while the load is pending
    drop(feed);
    advance(Duration::from_millis(600)).await;

    // Assert: the aborted task delivers nothing
    assert!(rx.try_recv().is_err(), "event from an aborted feed task");
}

#[tokio::test]
async fn test_manager_reuses_feed_tasks() {
    init_tracing();
    // Arrange
    let feeds = FeedManager::new();
    assert!(feeds.get_feed(FeedKind::General).await.is_none());

    // Act
    let first = feeds.open_feed(FeedKind::General).await;
    first.refresh().await.expect("refresh failed");
    let second = feeds.open_feed(FeedKind::General).await;

    // Assert: the second handle drives the same task
    let snapshot = second.snapshot().await.expect("snapshot failed");
    assert_eq!(
        snapshot.records.len(),
        5,
        "the second handle should see the refreshed list"
    );
    assert_eq!(feeds.list_feeds().await.len(), 1);

    feeds.close_feed(FeedKind::General).await;
    assert!(feeds.get_feed(FeedKind::General).await.is_none());
}
