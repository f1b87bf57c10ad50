//! State module for tracking crawl progress
//!
//! `PageState` tracks each listing page from discovery until it is fetched and parsed.

mod page_state;

pub use page_state::PageState;
