//! Mounted polling tasks and their lifetimes.

use super::cache::{Inner, ResourceCache};
use super::{RefreshPolicy, Resource};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Registry record for a live subscription.
pub(super) struct Mounted {
    pub(super) key: String,
    pub(super) policy: RefreshPolicy,
    pub(super) kick: Arc<Notify>,
}

/// A mounted resource. Polling stops when this is dropped.
pub struct Subscription {
    id: u64,
    key: String,
    cache: Weak<Inner>,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub(super) fn new(id: u64, key: String, cache: Weak<Inner>, handle: JoinHandle<()>) -> Self {
        Self {
            id,
            key,
            cache,
            handle,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
        if let Some(inner) = self.cache.upgrade() {
            inner.unmount(self.id);
        }
        tracing::debug!(key = %self.key, id = self.id, "Unmounted resource");
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("key", &self.key)
            .finish()
    }
}

type SettleFn = Arc<dyn Fn(&str) + Send + Sync>;

/// The set of resources the current screen has mounted, keyed by resource key.
///
/// Each render pass opens a [`Mount`], declares what it shows, and every
/// subscription not declared again is dropped when the mount ends.
pub struct SubscriptionSet {
    cache: ResourceCache,
    on_settle: SettleFn,
    active: HashMap<String, Subscription>,
}

impl SubscriptionSet {
    pub fn new(cache: ResourceCache, on_settle: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            cache,
            on_settle: Arc::new(on_settle),
            active: HashMap::new(),
        }
    }

    pub fn begin(&mut self) -> Mount<'_> {
        Mount {
            set: self,
            wanted: HashSet::new(),
        }
    }

    /// Sorted keys of all mounted resources.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.active.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// One declaration pass over a [`SubscriptionSet`].
pub struct Mount<'a> {
    set: &'a mut SubscriptionSet,
    wanted: HashSet<String>,
}

impl Mount<'_> {
    /// Keep `resource` mounted, starting its polling task if it is new.
    pub fn watch<T>(&mut self, resource: &Resource<T>) -> &mut Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let key = resource.key();
        self.wanted.insert(key.to_string());
        if !self.set.active.contains_key(key) {
            let on_settle = Arc::clone(&self.set.on_settle);
            let subscription = self.set.cache.watch(resource, move |key| on_settle(key));
            self.set.active.insert(key.to_string(), subscription);
        }
        self
    }

    /// Same as dropping the mount.
    pub fn finish(self) {}
}

impl Drop for Mount<'_> {
    fn drop(&mut self) {
        let wanted = &self.wanted;
        self.set.active.retain(|key, _| wanted.contains(key));
    }
}
