use encore_feed::{Catalog, Track};

/// Test the general catalog carries the fixed 5-entry table
#[test]
fn test_recommended_catalog_contents() {
    let catalog = Catalog::recommended();
    let tracks = catalog.tracks();
    assert_eq!(tracks.len(), 5);

    let pairs: Vec<(&str, &str)> = tracks
        .iter()
        .map(|track| (track.title.as_str(), track.artist.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Spring Day", "BTS"),
            ("Through the Night", "IU"),
            ("Dynamite", "BTS"),
            ("Hotel Del Luna", "IU"),
            ("Life Goes On", "BTS"),
        ]
    );
}

/// Test every recommended track carries a video URL and advice texts
#[test]
fn test_recommended_catalog_fields_present() {
    for track in Catalog::recommended().tracks() {
        assert!(track.video_url.starts_with("https://www.youtube.com/watch?v="));
        assert!(!track.reason.is_empty());
        assert!(!track.encouragement.is_empty());
    }
}

/// Test the favorites catalog carries its own 3-entry table
#[test]
fn test_favorites_catalog_contents() {
    let catalog = Catalog::favorites();
    let tracks = catalog.tracks();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0].title, "Spring Day");
    assert_eq!(tracks[0].artist, "BTS");
    assert_eq!(tracks[1].title, "Through the Night");
    assert_eq!(tracks[1].artist, "IU");
    assert_eq!(tracks[2].title, "LILAC");
    assert_eq!(tracks[2].artist, "IU");
}

/// Test ordinal lookup cycles through the table
#[test]
fn test_track_for_cycles() {
    let catalog = Catalog::recommended();
    assert_eq!(catalog.track_for(1).title, "Spring Day");
    assert_eq!(catalog.track_for(5).title, "Life Goes On");
    assert_eq!(catalog.track_for(6).title, "Spring Day");
    assert_eq!(catalog.track_for(12).title, "Through the Night");
}

/// Test ordinal 0 clamps to the first entry instead of panicking
#[test]
fn test_track_for_zero_ordinal() {
    let catalog = Catalog::favorites();
    assert_eq!(catalog.track_for(0).title, catalog.track_for(1).title);
}

/// Test a custom single-entry catalog always yields its only track
#[test]
fn test_single_entry_catalog() {
    let catalog = Catalog::new(vec![Track::new(
        "Only Song",
        "Only Artist",
        "https://example.com/only",
        "reason",
        "encouragement",
    )]);
    for ordinal in 1..=10 {
        assert_eq!(catalog.track_for(ordinal).title, "Only Song");
    }
}

/// Test an empty catalog is rejected at construction
#[test]
#[should_panic]
fn test_empty_catalog_panics() {
    let _ = Catalog::new(Vec::new());
}
