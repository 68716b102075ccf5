use lazy_static::lazy_static;

/// Roster identifier reserved for the developer support account.
pub const DEVELOPER_ID: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeerId {
    /// The built-in AI music manager.
    Assistant,
    /// A community member from the online roster.
    User(u32),
    /// The developer support contact.
    Developer,
}

/// The track a roster member most recently got recommended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentSong {
    pub title: String,
    pub artist: String,
    pub video_url: String,
}

impl RecentSong {
    fn new(title: &str, artist: &str, video_url: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            video_url: video_url.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Peer {
    pub id: PeerId,
    pub name: String,
    pub image: String,
    pub recent_song: Option<RecentSong>,
    pub online: bool,
}

impl Peer {
    fn listed(id: u32, name: &str, song: RecentSong) -> Self {
        Self {
            id: PeerId::User(id),
            name: name.to_string(),
            image: format!("/placeholder.svg?height=60&width=60&text={name}"),
            recent_song: Some(song),
            online: true,
        }
    }

    /// Members currently shown in the online roster strip.
    pub fn roster() -> Vec<Peer> {
        ROSTER.clone()
    }

    pub fn assistant() -> Peer {
        Peer {
            id: PeerId::Assistant,
            name: "AI Music Manager".to_string(),
            image: "/placeholder.svg?height=60&width=60&text=AI".to_string(),
            recent_song: None,
            online: true,
        }
    }

    pub fn developer() -> Peer {
        Peer {
            id: PeerId::Developer,
            name: "Developer".to_string(),
            image: "/placeholder.svg?height=60&width=60&text=DEV".to_string(),
            recent_song: Some(RecentSong::new(
                "Code & Coffee",
                "Developer",
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            )),
            online: true,
        }
    }

    /// Resolves any peer identifier to a displayable profile.
    pub fn resolve(id: PeerId) -> Peer {
        match id {
            PeerId::Assistant => Self::assistant(),
            PeerId::Developer => Self::developer(),
            PeerId::User(DEVELOPER_ID) => Self::developer(),
            PeerId::User(user_id) => ROSTER
                .iter()
                .find(|peer| peer.id == id)
                .cloned()
                .unwrap_or_else(|| Peer {
                    id,
                    name: format!("User {user_id}"),
                    image: format!("/placeholder.svg?height=60&width=60&text={user_id}"),
                    recent_song: None,
                    online: false,
                }),
        }
    }
}

lazy_static! {
    static ref ROSTER: Vec<Peer> = vec![
        Peer::listed(
            1,
            "Minsu Kim",
            RecentSong::new(
                "Spring Day",
                "BTS",
                "https://www.youtube.com/watch?v=xEeFrLSkMm8",
            ),
        ),
        Peer::listed(
            2,
            "Jieun Lee",
            RecentSong::new(
                "Through the Night",
                "IU",
                "https://www.youtube.com/watch?v=BzYnNdJhZQw",
            ),
        ),
        Peer::listed(
            3,
            "Seojun Park",
            RecentSong::new(
                "Dynamite",
                "BTS",
                "https://www.youtube.com/watch?v=gdZLi9oWNZg",
            ),
        ),
        Peer::listed(
            4,
            "Yujin Choi",
            RecentSong::new(
                "LILAC",
                "IU",
                "https://www.youtube.com/watch?v=v7bnOxV4jAc",
            ),
        ),
    ];
}
