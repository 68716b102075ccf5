use encore_feed::FeedConfig;

/// Test an empty query matches every record
#[test]
fn test_empty_query_matches_all() {
    let config = FeedConfig::general();
    for id in 1..=5 {
        assert!(config.record(id).matches(""));
    }
}

/// Test matching on a title substring
#[test]
fn test_title_substring_match() {
    let config = FeedConfig::general();
    let record = config.record(1);
    assert_eq!(record.title, "Spring Day");
    assert!(record.matches("Spring"));
    assert!(record.matches("ring D"));
}

/// Test matching on an artist substring
#[test]
fn test_artist_substring_match() {
    let config = FeedConfig::general();
    let record = config.record(2);
    assert_eq!(record.artist, "IU");
    assert!(record.matches("IU"));
}

/// Test matching is case-insensitive both ways
#[test]
fn test_match_case_insensitive() {
    let config = FeedConfig::general();
    let record = config.record(1);
    assert!(record.matches("bts"));
    assert!(record.matches("BTS"));
    assert!(record.matches("spring day"));
    assert!(record.matches("SPRING DAY"));
}

/// Test a query matching neither title nor artist is rejected
#[test]
fn test_no_match() {
    let config = FeedConfig::general();
    let record = config.record(1);
    assert!(!record.matches("Kenny"));
    assert!(!record.matches("2025"));
}

/// Test the display date follows the fixed-month formula
#[test]
fn test_display_date_formula() {
    let config = FeedConfig::general();
    assert_eq!(config.record(1).date, "2025-06-14");
    assert_eq!(config.record(14).date, "2025-06-1");
    assert_eq!(config.record(15).date, "2025-06-15");
    assert_eq!(config.record(16).date, "2025-06-14");
    assert_eq!(config.record(30).date, "2025-06-15");
}

/// Test the thumbnail path embeds the configured label and the identifier
#[test]
fn test_thumbnail_labels() {
    let general = FeedConfig::general();
    assert_eq!(
        general.record(7).thumbnail,
        "/placeholder.svg?height=80&width=80&text=Album7"
    );

    let favorites = FeedConfig::favorites();
    assert_eq!(
        favorites.record(3).thumbnail,
        "/placeholder.svg?height=80&width=80&text=Fav3"
    );
}
