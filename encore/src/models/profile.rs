use serde::{Deserialize, Serialize};

/// Genres offered by the profile setup grid.
pub const MUSIC_GENRES: [&str; 20] = [
    "K-Pop",
    "Pop",
    "Rock",
    "Hip-Hop",
    "R&B",
    "Jazz",
    "Classical",
    "Electronic",
    "Indie",
    "Ballad",
    "Trot",
    "Folk",
    "Punk",
    "Reggae",
    "Country",
    "Blues",
    "Metal",
    "Latin",
    "World Music",
    "New Age",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationMode {
    #[default]
    Preference,
    Ai,
}

impl RecommendationMode {
    pub fn all() -> [RecommendationMode; 2] {
        [Self::Preference, Self::Ai]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Preference => "Based on your taste",
            Self::Ai => "AI picks",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Preference => {
                "Recommendations built from your chosen genres and listening history"
            }
            Self::Ai => "Let the AI analyze your conversations and surface new music",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub nickname: String,
    pub image: Option<String>,
    pub genres: Vec<String>,
    pub mode: RecommendationMode,
    pub join_date: String,
    pub recommendation_count: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Chulsoo Kim".to_string(),
            nickname: "User".to_string(),
            image: Some("/placeholder.svg?height=150&width=150".to_string()),
            genres: vec!["Ballad".to_string(), "Jazz".to_string()],
            mode: RecommendationMode::Preference,
            join_date: "2024-01-15".to_string(),
            recommendation_count: 15,
        }
    }
}

impl UserProfile {
    /// Comma-joined genre list for profile rows.
    pub fn genre_summary(&self) -> String {
        if self.genres.is_empty() {
            "None yet".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}
