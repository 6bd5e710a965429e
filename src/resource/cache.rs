//! Keyed response cache with request coalescing.

use super::subscription::{Mounted, Subscription};
use super::{DEDUPE_WINDOW, Resource};
use crate::api::Transport;
use crate::error::Error;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

type Payload = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<Payload, Arc<Error>>>>;

/// Outcome of a fetch. Errors are shared between every caller of a coalesced request.
pub type FetchResult<T> = std::result::Result<Arc<T>, Arc<Error>>;

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct Entry {
    data: Option<Payload>,
    error: Option<Arc<Error>>,
    in_flight: Option<InFlight>,
    fetched_at: Option<Instant>,
}

impl Entry {
    fn is_fresh(&self, max_age: Option<Duration>) -> bool {
        match (self.fetched_at, max_age) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(max_age)) => at.elapsed() < max_age,
        }
    }
}

/// Snapshot of one resource as a view sees it.
pub struct Query<T> {
    /// Last successfully decoded value, kept across failed refetches.
    pub data: Option<Arc<T>>,
    /// Error of the most recent attempt, cleared by the next success.
    pub error: Option<Arc<Error>>,
    /// Nothing to show yet and a request is pending or about to start.
    pub is_loading: bool,
    /// A request is in flight, whether or not data is present.
    pub is_validating: bool,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: true,
            is_validating: false,
        }
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.is_loading,
            is_validating: self.is_validating,
        }
    }
}

impl<T> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("has_data", &self.data.is_some())
            .field("error", &self.error)
            .field("is_loading", &self.is_loading)
            .field("is_validating", &self.is_validating)
            .finish()
    }
}

pub(super) struct Inner {
    transport: Arc<dyn Transport>,
    entries: Mutex<HashMap<String, Entry>>,
    mounted: Mutex<HashMap<u64, Mounted>>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Inner {
    /// Store the result of request `id`, unless another request has replaced it.
    fn settle(&self, key: &str, id: u64, result: &Result<Payload, Arc<Error>>) -> bool {
        let mut entries = lock(&self.entries);
        let Some(entry) = entries.get_mut(key) else {
            tracing::debug!(key, "Discarding response for evicted key");
            return false;
        };
        if entry.in_flight.as_ref().map(|f| f.id) != Some(id) {
            tracing::debug!(key, id, "Discarding superseded response");
            return false;
        }

        entry.in_flight = None;
        match result {
            Ok(payload) => {
                entry.data = Some(Arc::clone(payload));
                entry.error = None;
                entry.fetched_at = Some(Instant::now());
            }
            Err(error) => {
                tracing::warn!(key, error = %error, "Resource fetch failed");
                entry.error = Some(Arc::clone(error));
            }
        }
        true
    }

    pub(super) fn unmount(&self, id: u64) {
        lock(&self.mounted).remove(&id);
    }
}

/// Shared cache of every resource the UI has asked for. Cheap to clone.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Arc<Inner>,
}

impl ResourceCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                entries: Mutex::new(HashMap::new()),
                mounted: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Cached value if it is still within the polling interval, otherwise
    /// the result of the in-flight or a new request.
    pub async fn fetch<T>(&self, resource: &Resource<T>) -> FetchResult<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.load(resource, resource.policy().interval).await
    }

    /// Refetch unless a value arrived within the dedupe window.
    pub async fn revalidate<T>(&self, resource: &Resource<T>) -> FetchResult<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.load(resource, Some(DEDUPE_WINDOW)).await
    }

    async fn load<T>(&self, resource: &Resource<T>, max_age: Option<Duration>) -> FetchResult<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let payload = match self.begin::<T>(resource.key(), max_age) {
            Ok(cached) => cached,
            Err(fetch) => fetch.await?,
        };
        downcast(resource.key(), payload)
    }

    /// Either a fresh cached payload or the request to wait on.
    fn begin<T>(&self, key: &str, max_age: Option<Duration>) -> Result<Payload, SharedFetch>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let mut entries = lock(&self.inner.entries);
        let entry = entries.entry(key.to_string()).or_default();

        if let Some(data) = &entry.data
            && entry.is_fresh(max_age)
        {
            return Ok(Arc::clone(data));
        }

        if let Some(in_flight) = &entry.in_flight {
            tracing::trace!(key, id = in_flight.id, "Joining in-flight request");
            return Err(in_flight.fetch.clone());
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let fetch = self.spawn_request::<T>(key.to_string(), id);
        entry.in_flight = Some(InFlight {
            id,
            fetch: fetch.clone(),
        });
        Err(fetch)
    }

    fn spawn_request<T>(&self, key: String, id: u64) -> SharedFetch
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tracing::debug!(key = %key, id, "Starting request");

        // Runs to completion even if every waiter goes away, so the entry always settles.
        let task = tokio::spawn(async move {
            let result = match inner.transport.get_json(&key).await {
                Ok(value) => serde_json::from_value::<T>(value)
                    .map(|decoded| Arc::new(decoded) as Payload)
                    .map_err(|e| Arc::new(Error::from(e))),
                Err(e) => Err(Arc::new(e)),
            };
            inner.settle(&key, id, &result);
            result
        });

        async move {
            task.await.unwrap_or_else(|e| {
                Err(Arc::new(Error::application(format!(
                    "request task failed: {e}"
                ))))
            })
        }
        .boxed()
        .shared()
    }

    /// Current view of a resource. Never blocks and never starts a request.
    pub fn query<T>(&self, resource: &Resource<T>) -> Query<T>
    where
        T: Send + Sync + 'static,
    {
        let entries = lock(&self.inner.entries);
        let Some(entry) = entries.get(resource.key()) else {
            return Query::default();
        };

        let data = entry
            .data
            .as_ref()
            .and_then(|payload| Arc::clone(payload).downcast::<T>().ok());
        let is_validating = entry.in_flight.is_some();

        Query {
            is_loading: data.is_none() && (is_validating || entry.error.is_none()),
            data,
            error: entry.error.clone(),
            is_validating,
        }
    }

    /// Any request currently in flight.
    pub fn is_fetching(&self) -> bool {
        lock(&self.inner.entries)
            .values()
            .any(|entry| entry.in_flight.is_some())
    }

    /// Keys whose last attempt failed with a connectivity error.
    pub fn failing_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.inner.entries)
            .iter()
            .filter(|(_, entry)| entry.error.as_ref().is_some_and(|e| e.is_connectivity()))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Drop the entry for `key`. A response still in flight for it is discarded.
    pub fn invalidate(&self, key: &str) {
        if lock(&self.inner.entries).remove(key).is_some() {
            tracing::debug!(key, "Invalidated resource");
        }
    }

    /// Mount a polling task for `resource`. `on_settle` runs with the key
    /// after every completed attempt. Dropping the subscription stops polling.
    pub fn watch<T, F>(&self, resource: &Resource<T>, on_settle: F) -> Subscription
    where
        T: DeserializeOwned + Send + Sync + 'static,
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let kick = Arc::new(Notify::new());
        lock(&self.inner.mounted).insert(
            id,
            Mounted {
                key: resource.key().to_string(),
                policy: resource.policy(),
                kick: Arc::clone(&kick),
            },
        );

        let handle = tokio::spawn(poll(
            self.clone(),
            resource.clone(),
            kick,
            on_settle,
        ));
        tracing::debug!(key = resource.key(), id, "Mounted resource");

        Subscription::new(id, resource.key().to_string(), Arc::downgrade(&self.inner), handle)
    }

    /// Revalidate mounted resources whose policy asks for it on focus.
    /// Returns how many were woken.
    pub fn focus_gained(&self) -> usize {
        self.kick_mounted(|mounted| mounted.policy.revalidate_on_focus)
    }

    /// Revalidate every mounted resource.
    pub fn revalidate_all(&self) -> usize {
        self.kick_mounted(|_| true)
    }

    fn kick_mounted(&self, filter: impl Fn(&Mounted) -> bool) -> usize {
        let mounted = lock(&self.inner.mounted);
        mounted
            .values()
            .filter(|m| filter(m))
            .inspect(|m| m.kick.notify_one())
            .count()
    }

    /// Keys with a live subscription, sorted and deduplicated.
    pub fn mounted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.inner.mounted)
            .values()
            .map(|m| m.key.clone())
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

fn downcast<T: Send + Sync + 'static>(key: &str, payload: Payload) -> FetchResult<T> {
    payload.downcast::<T>().map_err(|_| {
        Arc::new(Error::application(format!(
            "cached value for {key} has a different type"
        )))
    })
}

async fn poll<T, F>(cache: ResourceCache, resource: Resource<T>, kick: Arc<Notify>, on_settle: F)
where
    T: DeserializeOwned + Send + Sync + 'static,
    F: Fn(&str) + Send + Sync + 'static,
{
    // Polled resources trust a value younger than their interval on mount.
    // One-shot resources have no interval, so every mount revalidates.
    let mut trust_cache = resource.policy().interval.is_some();
    loop {
        let result = if trust_cache {
            cache.fetch(&resource).await
        } else {
            cache.revalidate(&resource).await
        };
        trust_cache = false;

        if let Err(e) = &result {
            tracing::debug!(key = resource.key(), error = %e, "Poll attempt failed");
        }
        on_settle(resource.key());

        match resource.policy().interval {
            Some(interval) => {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = kick.notified() => {}
                }
            }
            None => kick.notified().await,
        }
    }
}
