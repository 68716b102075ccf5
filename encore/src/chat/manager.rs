use std::collections::{HashMap, hash_map};
use std::sync::Arc;

use tokio::sync::Mutex as TokioMutex;

use crate::models::{Peer, PeerId};

use super::{ChatHandle, ChatListener, StubListener};

pub struct ChatManager {
    chats: Arc<TokioMutex<HashMap<PeerId, ChatHandle>>>,
    listener: Arc<dyn ChatListener>,
}

impl ChatManager {
    pub fn new() -> Self {
        Self::with_listener(Arc::new(StubListener))
    }

    pub fn with_listener<L>(listener: Arc<L>) -> Self
    where
        L: ChatListener + 'static,
    {
        Self {
            chats: Arc::new(TokioMutex::new(HashMap::new())),
            listener,
        }
    }

    /// Returns the conversation with `peer_id`, spawning its task on first use.
    pub async fn open_chat(&self, peer_id: PeerId) -> ChatHandle {
        let mut chats = self.chats.lock().await;
        match chats.entry(peer_id) {
            hash_map::Entry::Occupied(entry) => entry.get().clone(),
            hash_map::Entry::Vacant(entry) => {
                let peer = Peer::resolve(peer_id);
                let handle = ChatHandle::new(peer, self.listener.clone());
                entry.insert(handle.clone());
                handle
            }
        }
    }

    pub async fn get_chat(&self, peer_id: PeerId) -> Option<ChatHandle> {
        let chats = self.chats.lock().await;
        chats.get(&peer_id).cloned()
    }

    /// Forgets the conversation; its task stops once the last handle drops.
    pub async fn close_chat(&self, peer_id: PeerId) {
        let mut chats = self.chats.lock().await;
        chats.remove(&peer_id);
    }

    pub async fn list_chats(&self) -> Vec<ChatHandle> {
        let mut result = Vec::new();
        let chats = self.chats.lock().await;
        for chat in chats.values() {
            result.push(chat.clone());
        }
        result
    }

    /// Members shown in the online roster strip.
    pub fn online_peers(&self) -> Vec<Peer> {
        Peer::roster()
    }
}
