/// A single generated chat/recommendation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub date: String,
    pub title: String,
    pub artist: String,
    pub reason: String,
    pub encouragement: String,
    pub thumbnail: String,
    pub video_url: String,
    pub favorite: bool,
}

impl Record {
    /// An empty query matches everything; otherwise the query must appear
    /// as a case-insensitive substring of the title or the artist.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.artist.to_lowercase().contains(&query)
    }
}
