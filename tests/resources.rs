//! Resource cache behavior through the public API.

mod common;

use common::FakeApi;
use nordpuls::Config;
use nordpuls::models::{CongressStats, WatchlistResponse};
use nordpuls::resource::{self, RefreshPolicy, Resource, ResourceCache};
use nordpuls::state::{Action, Connection, Store, View};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn watchlist_body() -> serde_json::Value {
    json!({"stocks": [{"symbol": "VOLV-B.ST", "name": "Volvo B", "current_price": 210.5}]})
}

#[tokio::test(start_paused = true)]
async fn test_parallel_readers_share_one_request() {
    let api = Arc::new(
        FakeApi::new()
            .route(resource::watchlist().key(), watchlist_body())
            .delay(Duration::from_millis(200)),
    );
    let cache = ResourceCache::new(api.clone());
    let resource = resource::watchlist();

    let (a, b, c) = tokio::join!(
        cache.fetch(&resource),
        cache.fetch(&resource),
        cache.revalidate(&resource),
    );

    assert_eq!(api.calls(), 1);
    let a = a.unwrap();
    assert!(Arc::ptr_eq(&a, &b.unwrap()));
    assert!(Arc::ptr_eq(&a, &c.unwrap()));
    assert_eq!(a.stocks[0].symbol, "VOLV-B.ST");
}

#[tokio::test(start_paused = true)]
async fn test_dropping_subscription_stops_polling() {
    let key = "/api/stocks/watchlist";
    let api = Arc::new(FakeApi::new().route(key, watchlist_body()));
    let cache = ResourceCache::new(api.clone());
    let resource: Resource<WatchlistResponse> = Resource::from_key(key, RefreshPolicy::every(60));

    let subscription = cache.watch(&resource, |_| {});
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.calls(), 1);
    assert!(cache.query(&resource).data.is_some());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.calls(), 2);

    drop(subscription);
    assert!(cache.mounted_keys().is_empty());
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(api.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_invalidate_forgets_cached_value() {
    let key = "/api/stocks/caps";
    let api = Arc::new(FakeApi::new().route(key, json!({"caps": []})));
    let cache = ResourceCache::new(api.clone());
    let resource: Resource<nordpuls::models::CapSizes> = Resource::from_key(key, RefreshPolicy::once());

    cache.fetch(&resource).await.unwrap();
    cache.fetch(&resource).await.unwrap();
    assert_eq!(api.calls(), 1);

    cache.invalidate(key);
    assert!(cache.query(&resource).is_loading);
    cache.fetch(&resource).await.unwrap();
    assert_eq!(api.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_switching_views_remounts_resources() {
    let stats = resource::congress_stats(30);
    let trades = resource::congress_trades(30, None);
    let climate = resource::market_climate();
    let api = Arc::new(
        FakeApi::new()
            .route(stats.key(), json!({"total_trades": 0}))
            .route(trades.key(), json!({"trades": [], "total": 0}))
            .failing(climate.key()),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut store = Store::new(tx, ResourceCache::new(api.clone()), &Config::default());

    store.reduce(Action::SetView(View::Congress));
    store.sync_subscriptions();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let settled: Vec<String> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter_map(|action| match action {
            Action::ResourceSettled(key) => Some(key),
            _ => None,
        })
        .collect();
    assert!(settled.contains(&stats.key().to_string()));
    assert_eq!(store.connection(), Connection::Online);
    let query = store.congress_stats();
    assert_eq!(query.data.as_deref(), Some(&CongressStats::default()));

    store.reduce(Action::SetView(View::Climate));
    store.sync_subscriptions();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(store.cache.mounted_keys(), vec![climate.key().to_string()]);
    assert_eq!(store.connection(), Connection::Offline);
    assert!(store.climate().error.is_some());

    // Congress polls every ten minutes while mounted; unmounted, it stays quiet.
    tokio::time::sleep(Duration::from_secs(1800)).await;
    assert_eq!(api.calls_to(stats.key()), 1);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_waits_for_response() {
    let api = Arc::new(
        FakeApi::new()
            .route(resource::watchlist().key(), watchlist_body())
            .delay(Duration::from_secs(5)),
    );
    let cache = ResourceCache::new(api);
    let resource = resource::watchlist();

    let mut fetch = tokio_test::task::spawn(cache.fetch(&resource));
    tokio_test::assert_pending!(fetch.poll());
    let query = cache.query(&resource);
    assert!(query.is_loading);
    assert!(query.is_validating);

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(fetch.is_woken());
    let result = tokio_test::assert_ready!(fetch.poll());
    assert_eq!(result.unwrap().stocks.len(), 1);
    assert!(!cache.query(&resource).is_validating);
}

#[tokio::test(start_paused = true)]
async fn test_returning_to_view_refetches_one_shot_resource() {
    let days = Config::default().ui.rocket_days;
    let rockets = resource::rocket_history(days);
    let climate = resource::market_climate();
    let api = Arc::new(
        FakeApi::new()
            .route(rockets.key(), json!({"history": [], "stats": {"total_picks": 4}}))
            .route(climate.key(), json!({})),
    );
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut store = Store::new(tx, ResourceCache::new(api.clone()), &Config::default());

    store.reduce(Action::SetView(View::Rockets));
    store.sync_subscriptions();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.calls_to(rockets.key()), 1);

    store.reduce(Action::SetView(View::Climate));
    store.sync_subscriptions();
    tokio::time::sleep(Duration::from_secs(3 * 24 * 3600)).await;
    assert_eq!(api.calls_to(rockets.key()), 1);

    store.reduce(Action::SetView(View::Rockets));
    store.sync_subscriptions();
    assert_eq!(store.rocket_history().data.map(|h| h.stats.total_picks), Some(4));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.calls_to(rockets.key()), 2);
}

#[tokio::test(start_paused = true)]
async fn test_late_response_for_previous_window_is_not_shown() {
    let (month, week) = (resource::congress_stats(30), resource::congress_stats(7));
    let api = Arc::new(
        FakeApi::new()
            .route(month.key(), json!({"period_days": 30, "total_trades": 30}))
            .route(week.key(), json!({"period_days": 7, "total_trades": 7}))
            .route(resource::congress_trades(30, None).key(), json!({"trades": []}))
            .route(resource::congress_trades(7, None).key(), json!({"trades": []}))
            .delay(Duration::from_secs(5)),
    );
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut store = Store::new(tx, ResourceCache::new(api.clone()), &Config::default());

    store.reduce(Action::SetView(View::Congress));
    store.sync_subscriptions();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.calls_to(month.key()), 1);

    store.reduce(Action::PrevOption);
    store.sync_subscriptions();
    assert_eq!(store.congress.days, 7);

    // The 30-day request started first and lands first.
    tokio::time::sleep(Duration::from_millis(4500)).await;
    assert_eq!(store.congress_stats().data, None);

    tokio::time::sleep(Duration::from_secs(1)).await;
    let shown = store.congress_stats().data.map(|s| s.total_trades);
    assert_eq!(shown, Some(7));
}
