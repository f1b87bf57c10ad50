//! Crawl frontier for listing pages
//!
//! The frontier is an arena of page identities. Each entry carries its
//! [`PageState`]; a page is scheduled at most once no matter how many pages
//! link to it, and pages are handed out in discovery order.
//!
//! Pages are deduplicated on their canonical URL, but fetched by the URL they
//! were first discovered under.

use crate::state::PageState;
use crate::url::canonical_page_url;
use crate::{Result, WarnError};
use std::collections::HashMap;
use url::Url;

/// Identifier of a page within one frontier
pub type PageId = usize;

/// A page known to the crawl
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    /// URL the page was first discovered under
    pub url: Url,

    pub state: PageState,
}

/// Discovered and visited listing pages of one crawl
#[derive(Debug, Default)]
pub struct Frontier {
    entries: Vec<FrontierEntry>,

    /// Canonical URL string to entry index
    index: HashMap<String, PageId>,

    /// Position of the oldest page not yet handed out
    cursor: usize,
}

impl Frontier {
    /// Creates a frontier holding only the seed page
    pub fn new(seed: &Url) -> Self {
        let mut frontier = Self::default();
        frontier.insert(seed);
        frontier
    }

    /// Adds a page unless it is already known
    ///
    /// Returns true if the page was new.
    pub fn insert(&mut self, url: &Url) -> bool {
        let key: String = canonical_page_url(url).into();

        if self.index.contains_key(&key) {
            return false;
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(FrontierEntry {
            url: url.clone(),
            state: PageState::Discovered,
        });
        true
    }

    /// Hands out the oldest unvisited page and marks it as fetching
    pub fn next_page(&mut self) -> Option<(PageId, Url)> {
        let id = self.cursor;
        let entry = self.entries.get_mut(id)?;
        entry.state = PageState::Fetching;
        self.cursor += 1;
        Some((id, entry.url.clone()))
    }

    /// Moves a page to its next state
    pub fn mark(&mut self, id: PageId, state: PageState) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(WarnError::UnknownPage { id })?;

        if !entry.state.can_transition_to(state) {
            return Err(WarnError::InvalidTransition {
                from: entry.state,
                to: state,
            });
        }

        entry.state = state;
        Ok(())
    }

    /// Number of pages known to the crawl
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pages handed out so far
    pub fn visited_count(&self) -> usize {
        self.cursor
    }

    /// Number of pages still waiting to be fetched
    pub fn pending_count(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn entries(&self) -> &[FrontierEntry] {
        &self.entries
    }
}
