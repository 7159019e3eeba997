/// Page state definitions for tracking crawl progress
///
/// A URL moves `Discovered → Enqueued → Dispatched → {Fetched | Failed}`.
use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Link was found on a page but has not passed admission yet
    Discovered,

    /// URL sits in the frontier waiting for a dispatch slot
    Enqueued,

    /// URL is part of the round currently in flight
    Dispatched,

    // ===== Terminal States =====
    /// Page was fetched and extracted into a PageRecord
    Fetched,

    /// Fetch produced an ErrorRecord
    Failed,
}

impl PageState {
    /// Returns true if the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Enqueued)
                | (Self::Enqueued, Self::Dispatched)
                | (Self::Dispatched, Self::Fetched)
                | (Self::Dispatched, Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Enqueued => "enqueued",
            Self::Dispatched => "dispatched",
            Self::Fetched => "fetched",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
