use uuid::Uuid;

use super::DateTime;

/// Which side of a conversation produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    Me,
    Peer,
    Assistant,
}

impl Author {
    pub fn is_me(self) -> bool {
        matches!(self, Self::Me)
    }

    /// Sender label shown above transcript bubbles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Me => "Me",
            Self::Peer => "Peer",
            Self::Assistant => "AI Music Manager",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub send_time: DateTime,
}

impl ChatMessage {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            author,
            text: text.into(),
            send_time: DateTime::now(),
        }
    }

    pub fn outgoing(text: impl Into<String>) -> Self {
        Self::new(Author::Me, text)
    }
}
