//! Frontier and visited ledger
//!
//! The traversal state of one crawl: a FIFO queue of `(url, depth)` entries
//! pending a fetch, the set of URLs already dispatched, and the set of URLs ever
//! placed in the queue. Both sets only grow.

use crate::state::PageState;
use std::collections::{HashSet, VecDeque};

/// A canonical URL waiting for a fetch, tagged with its link distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Canonical URL
    pub url: String,

    /// Link hops from the start URL (start URL is 0)
    pub depth: u32,
}

/// Breadth-first frontier with dedup ledgers
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    enqueued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only `start_url` at depth 0
    pub fn seeded(start_url: &str) -> Self {
        let mut frontier = Self::new();
        frontier.enqueue(start_url, 0);
        frontier
    }

    /// Pushes `url` onto the back of the queue
    ///
    /// Returns false, leaving the queue untouched, when the URL was already
    /// enqueued or dispatched at some point during this crawl.
    pub fn enqueue(&mut self, url: &str, depth: u32) -> bool {
        if self.is_known(url) {
            return false;
        }

        self.enqueued.insert(url.to_string());
        self.queue.push_back(FrontierEntry {
            url: url.to_string(),
            depth,
        });
        true
    }

    /// Pops the oldest entry (discovery order)
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Records that `url` has been dispatched for fetch
    ///
    /// Returns false if it already was; a URL is dispatched at most once.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        debug_assert!(
            self.visited.contains(url)
                || self.state_of(url).can_transition_to(PageState::Dispatched),
            "{} dispatched without being enqueued",
            url
        );
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_enqueued(&self, url: &str) -> bool {
        self.enqueued.contains(url)
    }

    /// True if the URL was ever enqueued or dispatched
    pub fn is_known(&self, url: &str) -> bool {
        self.is_visited(url) || self.is_enqueued(url)
    }

    /// Lifecycle position of `url` as far as the ledger knows
    ///
    /// Terminal outcomes are tracked by the engine, so a dispatched URL reports
    /// `Dispatched` here.
    pub fn state_of(&self, url: &str) -> PageState {
        if self.is_visited(url) {
            PageState::Dispatched
        } else if self.is_enqueued(url) {
            PageState::Enqueued
        } else {
            PageState::Discovered
        }
    }

    /// Number of entries still waiting in the queue
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs dispatched so far
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Dispatched plus currently queued; this is what the page budget admits against
    pub fn known_len(&self) -> usize {
        self.visited.len() + self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
