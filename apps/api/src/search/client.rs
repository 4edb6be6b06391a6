//! Deduplicating job search client.
//!
//! Concurrent searches with the same normalized query share one in-flight
//! computation, so the remote source sees a single fetch. This is request
//! collapsing, not result caching: the entry is removed as soon as the
//! computation settles, and the next search fetches again.
//!
//! Each computation runs on its own tokio task. Callers only await a shared
//! handle to it, so a dropped caller cannot strand an entry in the map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::models::job::{SearchQuery, SearchResult};
use crate::search::source::{Notifier, RemoteJobSource, StaticFallbackProvider};

type InFlight = Shared<BoxFuture<'static, SearchResult>>;
// (text, location), both lowercased and trimmed
type SearchKey = (String, String);

const GENERIC_SOURCE_FAILURE: &str = "Remote job source failed";

struct Inner {
    source: Arc<dyn RemoteJobSource>,
    fallback: Arc<dyn StaticFallbackProvider>,
    notifier: Arc<dyn Notifier>,
    // key -> (generation, shared computation)
    in_flight: Mutex<HashMap<SearchKey, (u64, InFlight)>>,
    next_generation: AtomicU64,
}

impl Inner {
    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<SearchKey, (u64, InFlight)>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes the entry for `key` if it still belongs to `generation`.
    fn settle(&self, key: &SearchKey, generation: u64) {
        let mut in_flight = self.lock_in_flight();
        if in_flight.get(key).is_some_and(|(g, _)| *g == generation) {
            in_flight.remove(key);
        }
    }

    async fn run(&self, query: &SearchQuery, notify: bool) -> SearchResult {
        match self.source.fetch(query).await {
            Ok(items) => {
                info!(
                    "Fetched {} listings for '{}' in {}",
                    items.len(),
                    query.text,
                    query.location
                );
                if notify && !items.is_empty() {
                    if let Err(e) = self.notifier.notify(&items, query).await {
                        warn!("Job alert for '{}' failed: {e}", query.text);
                    }
                }
                SearchResult::ok(items)
            }
            Err(e) => {
                warn!(
                    "Job source failed for '{}' in {}: {e}; serving fallback listings",
                    query.text, query.location
                );
                let message = e.to_string();
                let mut result = self.fallback.get(query);
                result.succeeded = false;
                result.error_message = Some(if message.trim().is_empty() {
                    GENERIC_SOURCE_FAILURE.to_string()
                } else {
                    message
                });
                result
            }
        }
    }
}

/// Clears the in-flight entry when dropped. Owned by the computation task, so
/// the entry goes away whether the task finishes, panics or never runs.
struct SettleGuard {
    inner: Arc<Inner>,
    key: SearchKey,
    generation: u64,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.inner.settle(&self.key, self.generation);
    }
}

/// A computation registered in the map but not spawned yet.
struct Pending {
    key: SearchKey,
    generation: u64,
    sender: oneshot::Sender<SearchResult>,
}

/// Job search client that collapses concurrent identical queries.
/// Cheap to clone; clones share the same in-flight map.
#[derive(Clone)]
pub struct SearchClient {
    inner: Arc<Inner>,
}

impl SearchClient {
    pub fn new(
        source: Arc<dyn RemoteJobSource>,
        fallback: Arc<dyn StaticFallbackProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                fallback,
                notifier,
                in_flight: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Searches for jobs. Never fails: a remote failure yields the fallback
    /// listings with `succeeded: false` and an `error_message`.
    ///
    /// When a search for the same key is already running, this awaits that
    /// computation instead of starting another; its `notify` flag wins.
    pub async fn search(&self, query: SearchQuery, notify: bool) -> SearchResult {
        let query = query.normalized();
        let key = query.dedup_key();

        let (shared, pending) = {
            let mut in_flight = self.inner.lock_in_flight();
            let existing = in_flight.get(&key).map(|(_, shared)| shared.clone());
            match existing {
                Some(shared) => {
                    debug!("Joining in-flight search {key:?}");
                    (shared, None)
                }
                None => {
                    let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
                    let (sender, receiver) = oneshot::channel();
                    let shared = receive(receiver);
                    in_flight.insert(key.clone(), (generation, shared.clone()));
                    let pending = Pending {
                        key,
                        generation,
                        sender,
                    };
                    (shared, Some(pending))
                }
            }
        };

        // Spawned with the map unlocked: a task dropped inside `spawn` settles at once.
        if let Some(pending) = pending {
            self.start(query, notify, pending);
        }

        shared.await
    }

    fn start(&self, query: SearchQuery, notify: bool, pending: Pending) {
        let Pending {
            key,
            generation,
            sender,
        } = pending;
        let inner = Arc::clone(&self.inner);
        let guard = SettleGuard {
            inner: Arc::clone(&inner),
            key,
            generation,
        };

        tokio::spawn(async move {
            let result = inner.run(&query, notify).await;
            // Settle before publishing so a caller woken by the result starts fresh.
            drop(guard);
            let _ = sender.send(result);
        });
    }

    /// Number of searches currently in flight.
    pub fn in_flight_count(&self) -> usize {
        self.inner.lock_in_flight().len()
    }
}

fn receive(receiver: oneshot::Receiver<SearchResult>) -> InFlight {
    async move {
        receiver.await.unwrap_or_else(|_| {
            warn!("Search task ended without a result");
            SearchResult::failed(Vec::new(), "Search task ended without a result")
        })
    }
    .boxed()
    .shared()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
