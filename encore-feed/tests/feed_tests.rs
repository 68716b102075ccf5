use encore_feed::{Catalog, FeedConfig, Track};

fn ids(config: &FeedConfig, page: u32, query: &str) -> Vec<u32> {
    config
        .generate(page, query)
        .records
        .iter()
        .map(|record| record.id)
        .collect()
}

/// Test every full page of the general feed covers its contiguous id range
#[test]
fn test_general_page_ranges() {
    let config = FeedConfig::general();
    for page in 1..=6 {
        let start = (page - 1) * 5 + 1;
        let expected: Vec<u32> = (start..=start + 4).collect();
        assert_eq!(ids(&config, page, ""), expected, "page {page}");
    }
}

/// Test generation stops at the ceiling and reports it
#[test]
fn test_general_ceiling_reached() {
    let config = FeedConfig::general();

    let last = config.generate(6, "");
    assert_eq!(last.records.last().map(|r| r.id), Some(30));
    assert!(!last.reached_ceiling);

    let beyond = config.generate(7, "");
    assert!(beyond.records.is_empty());
    assert!(beyond.reached_ceiling);
}

/// Test a page straddling the ceiling is clipped mid-range
#[test]
fn test_clipped_page() {
    let config = FeedConfig::general().with_ceiling(13);
    let page = config.generate(3, "");
    assert_eq!(
        page.records.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![11, 12, 13]
    );
    assert!(page.reached_ceiling);
}

/// Test page 0 yields nothing and does not report the ceiling
#[test]
fn test_page_zero_is_empty() {
    let config = FeedConfig::general();
    let page = config.generate(0, "");
    assert!(page.records.is_empty());
    assert!(!page.reached_ceiling);
}

/// Test title/artist pairs cycle through the 5-entry table by (id - 1) mod 5
#[test]
fn test_general_catalog_cycle() {
    let config = FeedConfig::general();
    let first = config.generate(1, "").records;
    let pairs: Vec<(String, String)> = first
        .iter()
        .map(|r| (r.title.clone(), r.artist.clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Spring Day".to_string(), "BTS".to_string()),
            ("Through the Night".to_string(), "IU".to_string()),
            ("Dynamite".to_string(), "BTS".to_string()),
            ("Hotel Del Luna".to_string(), "IU".to_string()),
            ("Life Goes On".to_string(), "BTS".to_string()),
        ]
    );

    // The cycle wraps on the next page.
    let second = config.generate(2, "").records;
    assert_eq!(second[0].title, "Spring Day");
    assert_eq!(second[0].id, 6);
}

/// Test the favorite flag marks exactly the identifiers divisible by 3
#[test]
fn test_general_favorite_flags() {
    let config = FeedConfig::general();
    for page in 1..=6 {
        for record in config.generate(page, "").records {
            assert_eq!(record.favorite, record.id % 3 == 0, "id {}", record.id);
        }
    }
}

/// Test the favorites feed generates only favorite multiples of 3
#[test]
fn test_favorites_stride() {
    let config = FeedConfig::favorites();
    assert_eq!(ids(&config, 1, ""), vec![3]);
    assert_eq!(ids(&config, 2, ""), vec![6, 9]);
    assert_eq!(ids(&config, 3, ""), vec![12, 15]);

    for page in 1..=3 {
        for record in config.generate(page, "").records {
            assert!(record.favorite);
            assert_eq!(record.id % 3, 0);
        }
    }
}

/// Test the favorites feed ends after id 15
#[test]
fn test_favorites_ceiling() {
    let config = FeedConfig::favorites();
    let third = config.generate(3, "");
    assert!(!third.reached_ceiling);

    let fourth = config.generate(4, "");
    assert!(fourth.records.is_empty());
    assert!(fourth.reached_ceiling);
}

/// Test favorites index their own 3-entry table by generation ordinal
#[test]
fn test_favorites_catalog_cycle() {
    let config = FeedConfig::favorites();
    let titles: Vec<(u32, String)> = (1..=3)
        .flat_map(|page| config.generate(page, "").records)
        .map(|r| (r.id, r.title))
        .collect();
    assert_eq!(
        titles,
        vec![
            (3, "Spring Day".to_string()),
            (6, "Through the Night".to_string()),
            (9, "LILAC".to_string()),
            (12, "Spring Day".to_string()),
            (15, "Through the Night".to_string()),
        ]
    );
}

/// Test query filtering keeps only matching records within the page range
#[test]
fn test_query_filtering() {
    let config = FeedConfig::general();

    // BTS occupies table slots 1, 3 and 5, so ids 1, 3 and 5 on page 1.
    assert_eq!(ids(&config, 1, "bts"), vec![1, 3, 5]);
    assert_eq!(ids(&config, 1, "IU"), vec![2, 4]);
    assert_eq!(ids(&config, 1, "iu"), vec![2, 4]);
}

/// Test a query with no matches yields an empty page without ending the feed
#[test]
fn test_query_without_matches() {
    let config = FeedConfig::general();
    let page = config.generate(1, "no such song");
    assert!(page.records.is_empty());
    assert!(!page.reached_ceiling);
}

/// Test the ceiling report fires even when the filter removes every record
#[test]
fn test_ceiling_reported_for_filtered_page() {
    let config = FeedConfig::general();
    let page = config.generate(6, "no such song");
    assert!(page.records.is_empty());
    assert!(page.reached_ceiling);
}

/// Test a custom configuration combines ceiling, catalog and label overrides
#[test]
fn test_custom_configuration() {
    let catalog = Catalog::new(vec![Track::new(
        "Single",
        "Solo",
        "https://example.com/v",
        "r",
        "e",
    )]);
    let config = FeedConfig::general()
        .with_ceiling(7)
        .with_catalog(catalog)
        .with_thumbnail_label("Cover");

    let first = config.generate(1, "");
    assert_eq!(first.records.len(), 5);
    assert!(first.records.iter().all(|r| r.title == "Single"));
    assert_eq!(
        first.records[0].thumbnail,
        "/placeholder.svg?height=80&width=80&text=Cover1"
    );

    let second = config.generate(2, "");
    assert_eq!(
        second.records.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![6, 7]
    );
    assert!(second.reached_ceiling);
}

/// Test that regenerating the same page twice is deterministic
#[test]
fn test_generation_is_deterministic() {
    let config = FeedConfig::general();
    let a = config.generate(2, "bts");
    let b = config.generate(2, "bts");
    assert_eq!(a.records, b.records);
    assert_eq!(a.reached_ceiling, b.reached_ceiling);
}
