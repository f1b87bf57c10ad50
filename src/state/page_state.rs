/// Page state definitions for tracking crawl progress
///
/// This module defines all possible states a listing page can be in during a crawl.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Page has been discovered and waits in the frontier
    Discovered,

    /// Page is currently being fetched
    Fetching,

    // ===== Terminal Success States =====
    /// Page was fetched and its table contributed records
    Processed,

    // ===== Terminal Skip States =====
    /// Page was fetched but its table did not match the expected schema
    Skipped,

    // ===== Terminal Error States =====
    /// Page fetch failed; this aborts the crawl
    Failed,
}

impl PageState {
    /// Returns true if the transition from `self` to `next` is legal
    ///
    /// Pages move strictly forward: Discovered → Fetching → one terminal state.
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Fetching)
                | (Self::Fetching, Self::Processed)
                | (Self::Fetching, Self::Skipped)
                | (Self::Fetching, Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Fetching => "fetching",
            Self::Processed => "processed",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
