use std::sync::Arc;
use std::time::Duration;

use encore::chat::{
    ASSISTANT_REPLY, ChatManager, DEVELOPER_GREETING, DEVELOPER_REPLIES, PEER_REPLIES,
    detail_transcript,
};
use encore::models::{Author, PeerId};
use encore::ui::{UiEvent, UiEventListener};
use encore_feed::FeedConfig;
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

#[tokio::test]
async fn test_assistant_history_starts_empty() {
    init_tracing();
    // Arrange
    let (listener, _rx) = listener();
    let chats = ChatManager::with_listener(listener);
    // Act
    let chat = chats.open_chat(PeerId::Assistant).await;
    // Assert
    let history = chat.history().await.expect("history failed");
    assert!(history.is_empty(), "the assistant speaks second");
}

#[tokio::test(start_paused = true)]
async fn test_assistant_replies_after_delay() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let chats = ChatManager::with_listener(listener);
    let chat = chats.open_chat(PeerId::Assistant).await;

    // Act
    let sent = chat.send_message("Hello").await.expect("send failed");
    assert_eq!(sent.author, Author::Me);
    assert_eq!(sent.text, "Hello");
    let history = chat.history().await.expect("history failed");
    assert_eq!(history.len(), 1, "the reply must not land synchronously");

    // Assert: the reply arrives only after the full delay
    advance(Duration::from_millis(999)).await;
    assert!(rx.try_recv().is_err(), "reply arrived too early");

    advance(Duration::from_millis(2)).await;
    let event = rx.recv().await.expect("no message event");
    match event {
        UiEvent::NewMessage { peer_id, message } => {
            assert_eq!(peer_id, PeerId::Assistant);
            assert_eq!(message.author, Author::Assistant);
            assert_eq!(message.text, ASSISTANT_REPLY);
        }
        other => panic!("expected NewMessage, got {:?}", other),
    }
    let history = chat.history().await.expect("history failed");
    assert_eq!(history.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_multiple_sends_queue_replies() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let chats = ChatManager::with_listener(listener);
    let chat = chats.open_chat(PeerId::Assistant).await;

    // Act
    chat.send_message("First").await.expect("send failed");
    chat.send_message("Second").await.expect("send failed");
    chat.send_message("Third").await.expect("send failed");
    let history = chat.history().await.expect("history failed");
    assert_eq!(history.len(), 3);

    advance(Duration::from_millis(1001)).await;

    // Assert: one reply per message, delivered in order
    for _ in 0..3 {
        let event = rx.recv().await.expect("no message event");
        assert!(matches!(event, UiEvent::NewMessage { peer_id: PeerId::Assistant, .. }));
    }
    let history = chat.history().await.expect("history failed");
    assert_eq!(history.len(), 6);
    assert!(history[..3].iter().all(|message| message.author == Author::Me));
    assert!(history[3..].iter().all(|message| message.author == Author::Assistant));
}

#[tokio::test]
async fn test_peer_chat_seeds_conversation() {
    init_tracing();
    // Arrange
    let (listener, _rx) = listener();
    let chats = ChatManager::with_listener(listener);
    // Act
    let chat = chats.open_chat(PeerId::User(1)).await;
    // Assert
    let history = chat.history().await.expect("history failed");
    assert_eq!(history.len(), 3);
    assert!(history[0].text.contains("Minsu Kim"));
    assert_eq!(history[1].author, Author::Me);
    assert!(history[2].text.contains("Spring Day"));
}

#[tokio::test(start_paused = true)]
async fn test_peer_reply_is_canned() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let chats = ChatManager::with_listener(listener);
    let chat = chats.open_chat(PeerId::User(1)).await;

    // Act
    chat.send_message("It was great!").await.expect("send failed");
    let _ = chat.history().await.expect("history failed");
    advance(Duration::from_millis(1001)).await;

    // Assert
    let event = rx.recv().await.expect("no message event");
    match event {
        UiEvent::NewMessage { peer_id, message } => {
            assert_eq!(peer_id, PeerId::User(1));
            assert_eq!(message.author, Author::Peer);
            assert!(
                PEER_REPLIES.contains(&message.text.as_str()),
                "unexpected reply: {}",
                message.text
            );
        }
        other => panic!("expected NewMessage, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_developer_chat_greets_and_replies_slowly() {
    init_tracing();
    // Arrange
    let (listener, mut rx) = listener();
    let chats = ChatManager::with_listener(listener);
    let chat = chats.open_chat(PeerId::Developer).await;
    let history = chat.history().await.expect("history failed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, DEVELOPER_GREETING);

    // Act: the developer takes longer than regular peers
    chat.send_message("What is Encore?").await.expect("send failed");
    let _ = chat.history().await.expect("history failed");
    advance(Duration::from_millis(1400)).await;
    assert!(rx.try_recv().is_err(), "developer replied too early");

    advance(Duration::from_millis(101)).await;

    // Assert
    let event = rx.recv().await.expect("no message event");
    match event {
        UiEvent::NewMessage { peer_id, message } => {
            assert_eq!(peer_id, PeerId::Developer);
            assert_eq!(message.author, Author::Peer);
            assert!(
                DEVELOPER_REPLIES.contains(&message.text.as_str()),
                "unexpected reply: {}",
                message.text
            );
        }
        other => panic!("expected NewMessage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_manager_reuses_chat_tasks() {
    init_tracing();
    // Arrange
    let (listener, _rx) = listener();
    let chats = ChatManager::with_listener(listener);

    // Act
    let first = chats.open_chat(PeerId::Assistant).await;
    first.send_message("Hello").await.expect("send failed");
    let second = chats.open_chat(PeerId::Assistant).await;

    // Assert: both handles drive the same task
    let history = second.history().await.expect("history failed");
    assert_eq!(history.len(), 1);
    assert_eq!(chats.list_chats().await.len(), 1);

    // Closing forgets the transcript; reopening starts clean
    chats.close_chat(PeerId::Assistant).await;
    assert!(chats.get_chat(PeerId::Assistant).await.is_none());
    let reopened = chats.open_chat(PeerId::Assistant).await;
    let history = reopened.history().await.expect("history failed");
    assert!(history.is_empty());
}

#[test]
fn test_detail_transcript_rehydrates_conversation() {
    // Arrange
    let record = FeedConfig::general()
        .generate(1, "")
        .records
        .into_iter()
        .next()
        .expect("first page is empty");
    // Act
    let transcript = detail_transcript(&record);
    // Assert
    assert_eq!(transcript.len(), 10);
    assert_eq!(transcript[0].author, Author::Assistant);
    assert!(transcript[7].text.contains(&record.title));
    assert_eq!(transcript[9].text, record.encouragement);
}
