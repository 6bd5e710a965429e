//! Fake transport shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use nordpuls::api::Transport;
use nordpuls::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves canned JSON per path and counts every request.
#[derive(Default)]
pub struct FakeApi {
    routes: HashMap<String, Value>,
    failing: Vec<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), body);
        self
    }

    /// Answer `path` with a 503.
    pub fn failing(mut self, path: &str) -> Self {
        self.failing.push(path.to_string());
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.seen
            .lock()
            .map(|seen| seen.iter().filter(|p| *p == path).count())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(path.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.iter().any(|p| p == path) {
            return Err(Error::request(503, "Service Unavailable"));
        }
        self.routes
            .get(path)
            .cloned()
            .ok_or_else(|| Error::request(404, "Not Found"))
    }
}
