//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: lifecycle of a single URL (discovered, enqueued, dispatched, fetched, failed)
//! - `Frontier`: FIFO queue plus the visited and enqueued ledgers of one crawl

mod frontier;
mod page_state;

// Re-export main types
pub use frontier::{Frontier, FrontierEntry};
pub use page_state::PageState;
