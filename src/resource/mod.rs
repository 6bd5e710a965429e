//! Cached, self-refreshing views over API resources.
//!
//! A [`Resource`] names one API path (query string included) together with
//! its [`RefreshPolicy`]. The [`ResourceCache`] owns one entry per key:
//!
//! - concurrent fetches of the same key share one request,
//! - the last good value stays readable while a refetch runs or after it fails,
//! - a response is only applied if it belongs to the request currently
//!   registered for its key.
//!
//! Views mount a [`Subscription`] per resource they show; the subscription's
//! task polls on the policy interval and is aborted when it is dropped.

mod cache;
mod hooks;
mod subscription;

pub use cache::{FetchResult, Query, ResourceCache};
pub use hooks::{
    all_stocks, cap_sizes, congress_stats, congress_trades, evening_briefing, latest_briefing,
    market_climate, morning_briefing, rocket_history, simulation, stock_analysis, stock_history,
    top_movers, watchlist,
};
pub use subscription::{Mount, Subscription, SubscriptionSet};

use crate::api::Endpoint;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

/// Repeated requests for a key inside this window are served from cache.
pub const DEDUPE_WINDOW: Duration = Duration::from_secs(2);

/// How often a resource is refreshed while mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// Polling interval; `None` fetches once per mount.
    pub interval: Option<Duration>,
    /// Refetch when the terminal regains focus.
    pub revalidate_on_focus: bool,
}

impl RefreshPolicy {
    pub const fn every(secs: u64) -> Self {
        Self {
            interval: Some(Duration::from_secs(secs)),
            revalidate_on_focus: true,
        }
    }

    pub const fn once() -> Self {
        Self {
            interval: None,
            revalidate_on_focus: true,
        }
    }

    pub const fn without_focus_revalidation(mut self) -> Self {
        self.revalidate_on_focus = false;
        self
    }
}

/// Typed descriptor of one cache key.
pub struct Resource<T> {
    key: String,
    policy: RefreshPolicy,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Resource<T> {
    pub fn new(endpoint: Endpoint, policy: RefreshPolicy) -> Self {
        Self::from_key(endpoint.path(), policy)
    }

    pub fn from_key(key: impl Into<String>, policy: RefreshPolicy) -> Self {
        Self {
            key: key.into(),
            policy,
            _marker: PhantomData,
        }
    }

    /// Full request path, query string included.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self::from_key(self.key.clone(), self.policy)
    }
}

impl<T> PartialEq for Resource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.policy == other.policy
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("key", &self.key)
            .field("policy", &self.policy)
            .finish()
    }
}
