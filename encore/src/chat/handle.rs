use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom as _;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::models::{Author, ChatMessage, Peer, PeerId};

use super::{ChatListener, script};

#[derive(Clone)]
pub struct ChatHandle {
    inner: Arc<ChatHandleInner>,
}

impl ChatHandle {
    const MAX_COMMANDS: usize = 4;

    pub fn new(peer: Peer, listener: Arc<dyn ChatListener>) -> Self {
        let (command_tx, command_rx) = mpsc::channel(Self::MAX_COMMANDS);
        let main_task = tokio::spawn(Self::main_loop(peer.clone(), command_rx, listener));
        Self {
            inner: Arc::new(ChatHandleInner {
                peer,
                command_tx,
                main_task,
            }),
        }
    }

    pub fn peer(&self) -> &Peer {
        &self.inner.peer
    }

    pub fn peer_id(&self) -> PeerId {
        self.inner.peer.id
    }

    /// Record an outgoing message and schedule the canned reply.
    pub async fn send_message(
        &self,
        text: impl Into<String>,
    ) -> Result<ChatMessage, anyhow::Error> {
        let message = ChatMessage::outgoing(text);
        self.send_command(HandleCommand::SendMessage(message.clone()))
            .await?;
        Ok(message)
    }

    /// Full transcript as seen by the chat task, seed messages included.
    pub async fn history(&self) -> Result<Vec<ChatMessage>, anyhow::Error> {
        let (tx, rx) = oneshot::channel();
        self.send_command(HandleCommand::History { tx }).await?;
        rx.await.map_err(|_| anyhow::Error::msg("Handle is broken"))
    }

    async fn send_command(&self, command: HandleCommand) -> Result<(), anyhow::Error> {
        self.inner
            .command_tx
            .send(command)
            .await
            .map_err(|_| anyhow::Error::msg("Handle is broken"))
    }

    async fn main_loop(
        peer: Peer,
        mut command_rx: mpsc::Receiver<HandleCommand>,
        listener: Arc<dyn ChatListener>,
    ) {
        let mut messages = Self::seed_messages(&peer);
        let mut pending_replies = VecDeque::new();
        loop {
            tracing::trace!(peer = ?peer.id, "Wait for chat update");
            let deadline = pending_replies
                .front()
                .copied()
                .unwrap_or_else(Instant::now);
            tokio::select! {
                command = command_rx.recv() => {
                    let command = match command {
                        Some(v) => v,
                        None => return,
                    };
                    match command {
                        HandleCommand::SendMessage(message) => {
                            messages.push(message);
                            pending_replies.push_back(Instant::now() + Self::reply_delay(peer.id));
                        }
                        HandleCommand::History { tx } => {
                            _ = tx.send(messages.clone());
                        }
                    }
                }
                _ = sleep_until(deadline), if !pending_replies.is_empty() => {
                    pending_replies.pop_front();
                    let message =
                        ChatMessage::new(Self::reply_author(peer.id), Self::reply_text(peer.id));
                    messages.push(message.clone());
                    tracing::debug!(peer = ?peer.id, "Delivering canned reply");
                    listener.on_message(peer.id, message).await;
                }
            }
        }
    }

    fn seed_messages(peer: &Peer) -> Vec<ChatMessage> {
        match peer.id {
            // The assistant waits for the user to speak first.
            PeerId::Assistant => Vec::new(),
            PeerId::User(_) => {
                let mut messages = vec![
                    ChatMessage::new(
                        Author::Peer,
                        format!("Hello! This is the start of your chat with {}.", peer.name),
                    ),
                    ChatMessage::outgoing("Hi! Nice to meet you 😊"),
                ];
                if let Some(song) = &peer.recent_song {
                    messages.push(ChatMessage::new(
                        Author::Peer,
                        format!(
                            "I heard you got {} recommended recently! How was it?",
                            song.title
                        ),
                    ));
                }
                messages
            }
            PeerId::Developer => {
                vec![ChatMessage::new(Author::Peer, script::DEVELOPER_GREETING)]
            }
        }
    }

    fn reply_delay(peer_id: PeerId) -> Duration {
        match peer_id {
            PeerId::Assistant | PeerId::User(_) => Duration::from_millis(1000),
            PeerId::Developer => Duration::from_millis(1500),
        }
    }

    fn reply_author(peer_id: PeerId) -> Author {
        match peer_id {
            PeerId::Assistant => Author::Assistant,
            PeerId::User(_) | PeerId::Developer => Author::Peer,
        }
    }

    fn reply_text(peer_id: PeerId) -> String {
        let mut rng = rand::thread_rng();
        let text = match peer_id {
            PeerId::Assistant => script::ASSISTANT_REPLY,
            PeerId::User(_) => script::PEER_REPLIES
                .choose(&mut rng)
                .copied()
                .unwrap_or(script::PEER_REPLIES[0]),
            PeerId::Developer => script::DEVELOPER_REPLIES
                .choose(&mut rng)
                .copied()
                .unwrap_or(script::DEVELOPER_REPLIES[0]),
        };
        text.to_string()
    }
}

struct ChatHandleInner {
    peer: Peer,
    command_tx: mpsc::Sender<HandleCommand>,
    main_task: JoinHandle<()>,
}

impl Drop for ChatHandleInner {
    fn drop(&mut self) {
        self.main_task.abort();
    }
}

enum HandleCommand {
    SendMessage(ChatMessage),
    History { tx: oneshot::Sender<Vec<ChatMessage>> },
}
