use crate::{Catalog, Record};

/// Parameters of one simulated feed.
///
/// A feed walks identifier ranges page by page, keeps identifiers divisible
/// by `stride` (1 keeps every identifier), and stops for good once an
/// identifier crosses `ceiling`. Record contents come from the configured
/// catalog, cycled by generation ordinal.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    ceiling: u32,
    page_size: u32,
    stride: u32,
    favorite_stride: u32,
    thumbnail_label: String,
    catalog: Catalog,
}

/// One generated page plus the end-of-data report.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub records: Vec<Record>,
    pub reached_ceiling: bool,
}

impl FeedConfig {
    pub const PAGE_SIZE: u32 = 5;
    pub const GENERAL_CEILING: u32 = 30;
    pub const FAVORITES_CEILING: u32 = 15;
    pub const FAVORITE_STRIDE: u32 = 3;

    /// The general chat list: every identifier up to 30, 5-entry catalog.
    pub fn general() -> Self {
        Self {
            ceiling: Self::GENERAL_CEILING,
            page_size: Self::PAGE_SIZE,
            stride: 1,
            favorite_stride: Self::FAVORITE_STRIDE,
            thumbnail_label: "Album".to_string(),
            catalog: Catalog::recommended().clone(),
        }
    }

    /// The favorites list: multiples of 3 up to 15, 3-entry catalog.
    pub fn favorites() -> Self {
        Self {
            ceiling: Self::FAVORITES_CEILING,
            page_size: Self::PAGE_SIZE,
            stride: Self::FAVORITE_STRIDE,
            favorite_stride: Self::FAVORITE_STRIDE,
            thumbnail_label: "Fav".to_string(),
            catalog: Catalog::favorites().clone(),
        }
    }

    pub fn with_ceiling(mut self, ceiling: u32) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        assert!(stride >= 1, "stride must be at least 1");
        self.stride = stride;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_thumbnail_label(mut self, label: impl Into<String>) -> Self {
        self.thumbnail_label = label.into();
        self
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generates the records of a 1-based page, filtered by `query`.
    ///
    /// The walk stops at the first identifier beyond the ceiling and reports
    /// it through [`Page::reached_ceiling`], even when the page itself ends
    /// up empty. Page 0 yields an empty page without touching the report.
    pub fn generate(&self, page: u32, query: &str) -> Page {
        let mut result = Page::default();
        if page == 0 {
            return result;
        }
        let start = (page - 1) * self.page_size + 1;
        let end = start + self.page_size - 1;
        tracing::trace!(page, query, start, end, "Generating feed page");
        for id in start..=end {
            if id > self.ceiling {
                result.reached_ceiling = true;
                break;
            }
            if id % self.stride != 0 {
                continue;
            }
            let record = self.record(id);
            if record.matches(query) {
                result.records.push(record);
            }
        }
        result
    }

    /// Builds the deterministic record for an identifier.
    pub fn record(&self, id: u32) -> Record {
        let track = self.catalog.track_for(id / self.stride);
        Record {
            id,
            date: format!("2025-06-{}", 15 - (id % 15)),
            title: track.title.clone(),
            artist: track.artist.clone(),
            reason: track.reason.clone(),
            encouragement: track.encouragement.clone(),
            thumbnail: format!(
                "/placeholder.svg?height=80&width=80&text={}{}",
                self.thumbnail_label, id
            ),
            video_url: track.video_url.clone(),
            favorite: id % self.favorite_stride == 0,
        }
    }
}
