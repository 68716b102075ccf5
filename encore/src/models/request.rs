use super::DateTime;

/// Upper bound on request details, mirrored by the input counter.
pub const MAX_REQUEST_CONTENT: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    FeatureRequest,
    Improvement,
    BugReport,
    Other,
}

impl RequestKind {
    pub fn all() -> [RequestKind; 4] {
        [
            Self::FeatureRequest,
            Self::Improvement,
            Self::BugReport,
            Self::Other,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FeatureRequest => "Feature request",
            Self::Improvement => "Service improvement",
            Self::BugReport => "Bug report",
            Self::Other => "Other",
        }
    }
}

/// A note sent to the developer through the request form.
#[derive(Clone, Debug)]
pub struct DeveloperRequest {
    pub kind: RequestKind,
    pub content: String,
    pub submit_time: DateTime,
}
