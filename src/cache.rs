// SPDX-License-Identifier: MPL-2.0
//! Key-addressed cache of fetched gallery pages.
//!
//! This module provides the incremental "fetch next page" semantics behind
//! the growing image list, de-duplicating concurrent requests for the same
//! key and tracking loading/error/has-more state per entry.
//!
//! # Design
//!
//! - **Explicit instance**: the cache is an injected object, not a process
//!   global; its lifetime is the application session.
//! - **Append-only entries**: pages accumulate in fetch order until an
//!   explicit invalidation clears the whole sequence atomically.
//! - **At-most-one in-flight fetch per key**: enforced by marking the entry
//!   loading before the gateway call is issued.
//! - **Stale-response suppression**: each entry carries a generation counter;
//!   invalidation bumps it, so a fetch that was in flight when the entry was
//!   cleared resolves against a stale generation and is discarded.
//!
//! The internal lock is never held across an await: entry mutation is a
//! synchronous step relative to other readers of the same entry.

use crate::error::Error;
use crate::gateway::PageSource;
use crate::model::{Cursor, Page};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Loading state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch has been issued for this entry yet (or it was just invalidated).
    #[default]
    Idle,
    /// The first page is being fetched.
    Loading,
    /// A subsequent page is being fetched; earlier pages remain readable.
    LoadingMore,
    /// The most recent fetch failed; previously loaded pages are intact.
    Error,
    /// The most recent fetch completed and its page was appended.
    Success,
}

impl FetchStatus {
    /// Returns whether a fetch for this entry is currently in flight.
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, FetchStatus::Loading | FetchStatus::LoadingMore)
    }
}

/// Read-only snapshot of one cache entry, as returned by [`PaginationCache::query`].
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Fetched pages in fetch order. Append-only until invalidation.
    pub pages: Vec<Page>,
    /// Loading state at snapshot time.
    pub status: FetchStatus,
    /// Cursor carried by the most recently appended page.
    pub next_cursor: Option<Cursor>,
    /// Whether another page can be fetched. Starts `true` for a fresh entry.
    pub has_more: bool,
    /// Bumped whenever the page sequence changes; lets derived views skip
    /// recomputation when nothing moved.
    pub revision: u64,
    /// Error from the most recent failed fetch, if `status` is [`FetchStatus::Error`].
    pub last_error: Option<Error>,
}

impl Default for CacheEntry {
    /// The state of an entry no fetch has touched: no pages, `Idle`, and
    /// `has_more` set so the first fetch is allowed to run.
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            status: FetchStatus::Idle,
            next_cursor: None,
            has_more: true,
            revision: 0,
            last_error: None,
        }
    }
}

/// Mutable per-key state behind the cache lock.
#[derive(Debug)]
struct EntryState {
    pages: Vec<Page>,
    status: FetchStatus,
    next_cursor: Option<Cursor>,
    has_more: bool,
    generation: u64,
    revision: u64,
    last_error: Option<Error>,
}

impl Default for EntryState {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            status: FetchStatus::Idle,
            next_cursor: None,
            has_more: true,
            generation: 0,
            revision: 0,
            last_error: None,
        }
    }
}

impl EntryState {
    fn snapshot(&self) -> CacheEntry {
        CacheEntry {
            pages: self.pages.clone(),
            status: self.status,
            next_cursor: self.next_cursor.clone(),
            has_more: self.has_more,
            revision: self.revision,
            last_error: self.last_error.clone(),
        }
    }

    /// Resets everything except the generation and revision counters, which
    /// only ever move forward.
    fn clear(&mut self) {
        self.pages.clear();
        self.status = FetchStatus::Idle;
        self.next_cursor = None;
        self.has_more = true;
        self.last_error = None;
        self.generation += 1;
        self.revision += 1;
    }
}

/// Key-addressed cache of paginated fetches with request de-duplication.
pub struct PaginationCache {
    source: Arc<dyn PageSource>,
    entries: Mutex<HashMap<String, EntryState>>,
}

impl PaginationCache {
    /// Creates an empty cache reading pages from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current state for `key`, fetching the first page if no
    /// fetch has been issued for this entry yet.
    ///
    /// After an invalidation the entry is back in that untouched state, so
    /// the next `query` re-fetches from the beginning of the collection.
    pub async fn query(&self, key: &str) -> CacheEntry {
        let needs_initial_fetch = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key.to_string()).or_default();
            entry.pages.is_empty() && entry.status == FetchStatus::Idle
        };

        if needs_initial_fetch {
            self.fetch_next_page(key).await;
        }

        self.peek(key).await
    }

    /// Returns the current state for `key` without triggering any fetch.
    ///
    /// An entry that was never queried reads as the default empty state.
    pub async fn peek(&self, key: &str) -> CacheEntry {
        let entries = self.entries.lock().await;
        entries.get(key).map_or_else(CacheEntry::default, EntryState::snapshot)
    }

    /// Fetches the next page for `key` and appends it to the entry.
    ///
    /// No-op when a fetch for `key` is already in flight or the entry has no
    /// further pages. On failure the entry's status becomes
    /// [`FetchStatus::Error`] and previously loaded pages are preserved. A
    /// result arriving after the entry was invalidated is discarded.
    pub async fn fetch_next_page(&self, key: &str) {
        let (cursor, generation) = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key.to_string()).or_default();

            if entry.status.is_in_flight() {
                tracing::debug!(key, "fetch already in flight, skipping");
                return;
            }
            if !entry.has_more {
                tracing::debug!(key, "collection exhausted, skipping fetch");
                return;
            }

            entry.status = if entry.pages.is_empty() {
                FetchStatus::Loading
            } else {
                FetchStatus::LoadingMore
            };
            (entry.next_cursor.clone(), entry.generation)
        };

        let result = self.source.fetch_page(cursor.as_deref()).await;

        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(key) else {
            return;
        };

        if entry.generation != generation {
            // Invalidated while the fetch was in flight. The entry has already
            // been reset (and may even be loading again); this result must not
            // be applied.
            tracing::debug!(key, "discarding stale page fetched before invalidation");
            return;
        }

        match result {
            Ok(page) => {
                tracing::debug!(key, images = page.len(), has_next = page.has_next(), "page appended");
                entry.has_more = page.has_next();
                entry.next_cursor = page.after.clone();
                entry.pages.push(page);
                entry.revision += 1;
                entry.status = FetchStatus::Success;
                entry.last_error = None;
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "page fetch failed");
                entry.status = FetchStatus::Error;
                entry.last_error = Some(err);
            }
        }
    }

    /// Clears the entry for `key` back to its initial empty state.
    ///
    /// The clear is atomic with respect to readers: no partial or mixed-cursor
    /// state is ever observable. If a fetch for `key` is in flight, its
    /// eventual result is discarded rather than applied.
    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            tracing::debug!(key, dropped_pages = entry.pages.len(), "entry invalidated");
            entry.clear();
        }
    }
}

impl std::fmt::Debug for PaginationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationCache").finish_non_exhaustive()
    }
}
