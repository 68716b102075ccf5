use lazy_static::lazy_static;

/// A canned catalog entry from which records and recommendations are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub video_url: String,
    pub reason: String,
    pub encouragement: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        video_url: impl Into<String>,
        reason: impl Into<String>,
        encouragement: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            video_url: video_url.into(),
            reason: reason.into(),
            encouragement: encouragement.into(),
        }
    }
}

/// An ordered, non-empty table of canned tracks that feeds cycle through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        assert!(!tracks.is_empty(), "catalog must contain at least one track");
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The track for a 1-based ordinal, cycling through the table.
    pub fn track_for(&self, ordinal: u32) -> &Track {
        let index = ordinal.saturating_sub(1) as usize % self.tracks.len();
        &self.tracks[index]
    }

    /// The 5-entry table behind the general feed and the recommendation screen.
    pub fn recommended() -> &'static Catalog {
        &RECOMMENDED
    }

    /// The 3-entry table behind the favorites feed.
    pub fn favorites() -> &'static Catalog {
        &FAVORITES
    }
}

lazy_static! {
    static ref RECOMMENDED: Catalog = Catalog::new(vec![
        Track::new(
            "Spring Day",
            "BTS",
            "https://www.youtube.com/watch?v=xEeFrLSkMm8",
            "An emotional melody where longing and hope coexist, bringing comfort and \
             courage through hard times. Like the turning seasons, it carries the message \
             that every hardship passes.",
            "Just as a warm spring follows the cold winter, today's troubles will surely \
             pass. Your spring day is coming soon!",
        ),
        Track::new(
            "Through the Night",
            "IU",
            "https://www.youtube.com/watch?v=BzYnNdJhZQw",
            "A calm, warm melody that puts the mind at ease and beautifully expresses \
             caring for someone dear. A healing song for the end of the day.",
            "You worked hard today. Like a star in the night sky, you are a precious \
             light to someone. Have a peaceful night!",
        ),
        Track::new(
            "Dynamite",
            "BTS",
            "https://www.youtube.com/watch?v=gdZLi9oWNZg",
            "A bright, upbeat rhythm that recharges your energy, breathing life into a \
             tiring routine and helping you start the day with a positive mind.",
            "Let out the dynamite energy hiding inside you! Make today shine!",
        ),
        Track::new(
            "Hotel Del Luna",
            "IU",
            "https://www.youtube.com/watch?v=v7bnOxV4jAc",
            "A dreamy, mysterious track, the perfect pick when you want to step out of \
             the everyday and feel something special. IU's distinctive vocals carry it.",
            "It is okay to slip away from reality into a dream once in a while. Go make \
             a special moment of your own!",
        ),
        Track::new(
            "Life Goes On",
            "BTS",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "A consoling song carrying the message that life goes on even through \
             difficult times. Its calm melody and warm lyrics bring peace of mind.",
            "Hard times come, but life keeps flowing. Yours will keep going beautifully \
             too. One step at a time today!",
        ),
    ]);
    static ref FAVORITES: Catalog = Catalog::new(vec![
        Track::new(
            "Spring Day",
            "BTS",
            "https://www.youtube.com/watch?v=xEeFrLSkMm8",
            "An emotional melody where longing and hope coexist, bringing comfort and \
             courage through hard times.",
            "Just as a warm spring follows the cold winter, today's troubles will surely \
             pass. Your spring day is coming soon!",
        ),
        Track::new(
            "Through the Night",
            "IU",
            "https://www.youtube.com/watch?v=BzYnNdJhZQw",
            "A calm, warm melody that puts the mind at ease and beautifully expresses \
             caring for someone dear.",
            "You worked hard today. Like a star in the night sky, you are a precious \
             light to someone.",
        ),
        Track::new(
            "LILAC",
            "IU",
            "https://www.youtube.com/watch?v=v7bnOxV4jAc",
            "A mature, polished melody cheering on a fresh start in life.",
            "New beginnings are always thrilling and a little scary, but you can \
             absolutely do this!",
        ),
    ]);
}
