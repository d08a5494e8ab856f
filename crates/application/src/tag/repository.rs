use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, warn};

use domain::{ConnectivityProbe, DataError, Tag, TagStore};

/// Cache state guarded by a single lock.
///
/// Invariants: the cache serves a request only when it is clean and
/// non-empty; `in_flight` is Some for exactly as long as one top-level
/// fetch is executing.
#[derive(Default)]
struct CacheState {
    cached: Vec<Tag>,
    dirty: bool,
    in_flight: Option<broadcast::Sender<Result<Vec<Tag>, DataError>>>,
}

/// What a `get_tags` call decided to do while holding the state lock.
enum Plan {
    ServeCached(Vec<Tag>),
    Join(broadcast::Receiver<Result<Vec<Tag>, DataError>>),
    Lead(broadcast::Receiver<Result<Vec<Tag>, DataError>>),
}

/// Centralized gateway for working with the remote and local tag stores.
///
/// Callers see one authoritative source of tags; behind it sit an
/// in-memory cache, a durable local store and the remote API. At most one
/// top-level fetch runs at a time per instance: concurrent callers join
/// the in-flight fetch and receive its result instead of issuing another
/// source call.
pub struct TagsRepository {
    remote: Arc<dyn TagStore>,
    local: Arc<dyn TagStore>,
    connectivity: Arc<dyn ConnectivityProbe>,
    state: Arc<Mutex<CacheState>>,
}

impl TagsRepository {
    pub fn new(
        remote: Arc<dyn TagStore>,
        local: Arc<dyn TagStore>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            remote,
            local,
            connectivity,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Load tags from the cache, the local store or the remote API,
    /// whichever the current state selects.
    ///
    /// Resolution order: join an in-flight fetch if one exists, serve a
    /// clean non-empty cache without I/O, otherwise dispatch a fetch from
    /// the remote API when connected or from the local store when not.
    /// The fetch runs on its own task, so it completes and answers every
    /// joined caller even if the caller that started it is cancelled
    /// mid-await. Every surviving caller receives exactly one result.
    pub async fn get_tags(&self) -> Result<Vec<Tag>, DataError> {
        let plan = {
            let mut state = self.state.lock().await;
            if let Some(tx) = &state.in_flight {
                Plan::Join(tx.subscribe())
            } else if !state.dirty && !state.cached.is_empty() {
                Plan::ServeCached(state.cached.clone())
            } else {
                let (tx, rx) = broadcast::channel(1);
                state.in_flight = Some(tx);
                Plan::Lead(rx)
            }
        };

        match plan {
            Plan::ServeCached(tags) => {
                debug!(count = tags.len(), "returning tags from cache");
                Ok(tags)
            }
            Plan::Join(rx) => {
                debug!("fetch already in flight, joining it");
                await_fetch(rx).await
            }
            Plan::Lead(rx) => {
                // No await point between taking the guard and this spawn,
                // so the fetch task always starts once the guard is set.
                self.spawn_fetch();
                await_fetch(rx).await
            }
        }
    }

    /// Mark the cached tags stale so the next request bypasses the cache.
    /// No I/O, idempotent.
    pub async fn refresh_tags(&self) {
        let mut state = self.state.lock().await;
        state.dirty = true;
    }

    /// Fetch tags from the remote API.
    ///
    /// On success the cache is replaced and the result is written through
    /// to the local store on a spawned task whose outcome is only logged.
    /// On failure the cache is left untouched.
    pub async fn get_tags_from_remote(&self) -> Result<Vec<Tag>, DataError> {
        fetch_remote(&self.remote, &self.local, &self.state).await
    }

    /// Fetch tags from the local store. On success the cache is replaced;
    /// an empty store is a valid success with an empty collection.
    pub async fn get_tags_from_local(&self) -> Result<Vec<Tag>, DataError> {
        fetch_local(&self.local, &self.state).await
    }

    /// Shut down this repository and both attached stores.
    ///
    /// Explicit teardown barrier: operations on the instance afterwards
    /// are undefined.
    pub async fn shutdown(&self) {
        debug!("shutting down the tags repository");
        self.local.shutdown().await;
        self.remote.shutdown().await;

        let mut state = self.state.lock().await;
        state.cached.clear();
        state.dirty = false;
        state.in_flight = None;
    }

    /// Run the routed fetch to completion on its own task and publish the
    /// outcome to everyone holding a receiver. Cancelling the caller that
    /// dispatched it cancels nothing here.
    fn spawn_fetch(&self) {
        let remote = Arc::clone(&self.remote);
        let local = Arc::clone(&self.local);
        let connectivity = Arc::clone(&self.connectivity);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = if connectivity.is_connected().await {
                debug!("fetching tags from the remote API");
                fetch_remote(&remote, &local, &state).await
            } else {
                debug!("not connected, loading tags from the local store");
                fetch_local(&local, &state).await
            };

            // Publish only after the cache update above has landed, then
            // release the single-flight guard. A shutdown may already have
            // cleared the guard; joiners then see the channel close.
            let mut state = state.lock().await;
            if let Some(tx) = state.in_flight.take() {
                let _ = tx.send(result);
            }
        });
    }
}

async fn await_fetch(
    mut rx: broadcast::Receiver<Result<Vec<Tag>, DataError>>,
) -> Result<Vec<Tag>, DataError> {
    match rx.recv().await {
        Ok(result) => result,
        Err(_) => Err(DataError::NotAvailable(
            "in-flight fetch was abandoned".to_string(),
        )),
    }
}

async fn fetch_remote(
    remote: &Arc<dyn TagStore>,
    local: &Arc<dyn TagStore>,
    state: &Arc<Mutex<CacheState>>,
) -> Result<Vec<Tag>, DataError> {
    match remote.get_tags().await {
        Ok(tags) => {
            refresh_cache(state, &tags).await;
            refresh_local_store(local, tags.clone());
            Ok(tags)
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch tags from the remote API");
            Err(e)
        }
    }
}

async fn fetch_local(
    local: &Arc<dyn TagStore>,
    state: &Arc<Mutex<CacheState>>,
) -> Result<Vec<Tag>, DataError> {
    match local.get_tags().await {
        Ok(tags) => {
            refresh_cache(state, &tags).await;
            Ok(tags)
        }
        Err(e) => {
            warn!(error = %e, "failed to load tags from the local store");
            Err(e)
        }
    }
}

/// Whole-collection replace plus dirty-flag clear, atomic with respect
/// to readers.
async fn refresh_cache(state: &Arc<Mutex<CacheState>>, tags: &[Tag]) {
    let mut state = state.lock().await;
    state.cached = tags.to_vec();
    state.dirty = false;
}

/// Fire-and-forget write-through to the local store. The caller is never
/// blocked on it; a failed save is logged and swallowed.
fn refresh_local_store(local: &Arc<dyn TagStore>, tags: Vec<Tag>) {
    let local = Arc::clone(local);
    tokio::spawn(async move {
        match local.save_tags(&tags).await {
            Ok(()) => debug!(count = tags.len(), "tags persisted to the local store"),
            Err(e) => error!(error = %e, "failed to persist tags to the local store"),
        }
    });
}
