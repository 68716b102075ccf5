use async_trait::async_trait;

use crate::models::{ChatMessage, PeerId};

#[async_trait]
pub trait ChatListener: Send + Sync {
    /// A canned reply arrived in the conversation with `peer_id`.
    async fn on_message(&self, peer_id: PeerId, message: ChatMessage);
}

pub(super) struct StubListener;

#[async_trait]
impl ChatListener for StubListener {
    async fn on_message(&self, peer_id: PeerId, message: ChatMessage) {
        _ = peer_id;
        _ = message;
    }
}
