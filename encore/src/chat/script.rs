//! Canned conversation content delivered by the chat tasks.

use encore_feed::Record;

use crate::models::{Author, ChatMessage};

/// Greeting the assistant sends back after every user message.
pub const ASSISTANT_REPLY: &str =
    "Hello! Welcome to Encore. Let me ask you a few questions to find music that suits you.";

/// Replies a roster member picks from at random.
pub const PEER_REPLIES: [&str; 4] = [
    "It was such a good song!",
    "I love that song too ✨",
    "We have similar taste in music!",
    "Any other recommendations?",
];

/// First message in a conversation with the developer.
pub const DEVELOPER_GREETING: &str = "Hello! I'm the Encore developer. If you have any questions or suggestions, feel free to reach out! 😊";

/// Replies the developer picks from at random.
pub const DEVELOPER_REPLIES: [&str; 6] = [
    "Thanks for the feedback! We will look into it.",
    "That feature will be included in the next update.",
    "Could you share a few more details? That would help a lot.",
    "We are always working to improve the experience!",
    "Thanks for the bug report. We will fix it soon.",
    "What a great idea! I will discuss it with the team.",
];

/// Quick prompts under the developer chat input: button label and message text.
pub const QUICK_MESSAGES: [(&str, &str); 3] = [
    ("🎵 About the app", "What is Encore?"),
    ("📖 How it works", "How do I use the app?"),
    ("👨‍💻 Meet the developer", "Who built this app?"),
];

/// Rebuilds the conversation that led to a recommendation from its record.
pub fn detail_transcript(record: &Record) -> Vec<ChatMessage> {
    let reason_preview: String = record.reason.chars().take(100).collect();
    vec![
        ChatMessage::new(Author::Assistant, "Hello! How are you feeling today?"),
        ChatMessage::outgoing("Hello! I'm feeling a little down today. It has been a rough day."),
        ChatMessage::new(
            Author::Assistant,
            "Sorry to hear that. On days like this, music that comforts the heart can really help. What genre do you usually enjoy?",
        ),
        ChatMessage::outgoing(
            "I usually like ballads and calm music. Songs that put my mind at ease.",
        ),
        ChatMessage::new(
            Author::Assistant,
            "Great choice! Ballads really do have the power to soothe. Is there a singer or artist you especially like?",
        ),
        ChatMessage::outgoing(
            "I often listen to artists like IU and BTS. I especially like emotional songs.",
        ),
        ChatMessage::new(
            Author::Assistant,
            "Excellent taste! Let me pick the perfect song for your mood right now. One moment please...",
        ),
        ChatMessage::new(
            Author::Assistant,
            format!(
                "I found the perfect song! \"{}\" - {} is my recommendation. {}...",
                record.title, record.artist, reason_preview
            ),
        ),
        ChatMessage::outgoing("Wow, what a great recommendation! I really love this song. Thank you!"),
        ChatMessage::new(Author::Assistant, record.encouragement.clone()),
    ]
}
