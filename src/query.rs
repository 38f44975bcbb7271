//! Minimal client-side query cache.
//!
//! A [`Query`] tracks one remote resource: its last good data, its fetch
//! status and when it was fetched. Fetches are numbered; a response for an
//! older fetch than the latest one started is discarded, so a slow request
//! can never overwrite fresher data.

use std::time::{Duration, Instant};

/// Fetch status of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Never fetched.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Success,
    /// The last fetch failed with this message.
    Error(String),
}

/// Cached state of one remote resource.
#[derive(Debug, Clone)]
pub struct Query<T> {
    key: &'static str,
    data: Option<T>,
    status: Status,
    generation: u64,
    fetched_at: Option<Instant>,
    stale_time: Duration,
    // Latest generation begun when the data was invalidated; only a fetch
    // started after that clears it.
    invalidated: Option<u64>,
}

impl<T> Query<T> {
    /// Creates an empty query. Data older than `stale_time` is refetched.
    pub fn new(key: &'static str, stale_time: Duration) -> Self {
        Self {
            key,
            data: None,
            status: Status::Idle,
            generation: 0,
            fetched_at: None,
            stale_time,
            invalidated: None,
        }
    }

    /// Cache key, used for logging.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Last successfully fetched data. Kept while a refetch is loading or
    /// after a refetch failed.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// True while the first fetch is in flight and nothing can be shown yet.
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading && self.data.is_none()
    }

    /// Error message of the last fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the owner should start a fetch now.
    pub fn needs_fetch(&self, now: Instant) -> bool {
        if self.status == Status::Loading {
            return false;
        }
        match self.fetched_at {
            None => true,
            Some(at) => self.invalidated.is_some() || now.duration_since(at) >= self.stale_time,
        }
    }

    /// Marks a fetch as started and returns its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = Status::Loading;
        tracing::debug!(key = self.key, generation = self.generation, "query fetch started");
        self.generation
    }

    /// Records the outcome of fetch `generation`. Returns false, leaving the
    /// cache untouched, when a newer fetch has started since.
    pub fn resolve<E: std::fmt::Display>(
        &mut self,
        generation: u64,
        result: Result<T, E>,
        now: Instant,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(key = self.key, generation, latest = self.generation, "stale response dropped");
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.status = Status::Success;
                self.fetched_at = Some(now);
            }
            Err(err) => {
                tracing::warn!(key = self.key, error = %err, "query fetch failed");
                self.status = Status::Error(err.to_string());
                self.fetched_at = Some(now);
            }
        }
        if self.invalidated.is_some_and(|at| generation > at) {
            self.invalidated = None;
        }
        true
    }

    /// Marks the data stale so the next [`needs_fetch`](Self::needs_fetch)
    /// check triggers a refetch. A fetch already in flight does not count:
    /// its result is kept but the data stays stale.
    pub fn invalidate(&mut self) {
        self.invalidated = Some(self.generation);
    }
}
