//! Full-frame rendering against ratatui's test backend.

mod common;

use common::FakeApi;
use nordpuls::Config;
use nordpuls::resource::{self, ResourceCache};
use nordpuls::state::{Action, Store, View};
use nordpuls::ui::{Theme, Ui};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

fn store_with(api: FakeApi) -> Store {
    let (tx, _rx) = mpsc::unbounded_channel();
    Store::new(tx, ResourceCache::new(Arc::new(api)), &Config::default())
}

fn draw(store: &Store) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| Ui::render(frame, store)).unwrap();
    terminal.backend().buffer().clone()
}

/// Position of the first cell where `needle` starts.
fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    let chars: Vec<char> = needle.chars().collect();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            let fits = chars.iter().enumerate().all(|(i, c)| {
                let col = x + i as u16;
                col < buffer.area.width && buffer[(col, y)].symbol() == c.to_string()
            });
            if fits {
                return Some((x, y));
            }
        }
    }
    None
}

#[tokio::test]
async fn test_watchlist_renders_quotes_and_degraded_items() {
    let api = FakeApi::new().route(
        resource::watchlist().key(),
        json!({"stocks": [
            {"symbol": "SINCH.ST", "name": "Sinch", "error": "timeout"},
            {"symbol": "VOLV-B.ST", "name": "Volvo B", "market": "OMX Stockholm",
             "current_price": 210.5, "change_percent": 1.23, "volume_vs_avg": 1.1,
             "currency": "SEK", "signal_type": "BUY"}
        ]}),
    );
    let mut store = store_with(api);
    store.cache.fetch(&resource::watchlist()).await.unwrap();
    store.reduce(Action::SetView(View::Watchlist));

    let buffer = draw(&store);
    let theme = Theme::default();

    assert!(find(&buffer, "Bevakning (2)").is_some());
    assert!(find(&buffer, "210,50 SEK").is_some());
    assert!(find(&buffer, "Kunde inte hämta data").is_some());
    assert!(find(&buffer, "[BUY]").is_some());

    let (x, y) = find(&buffer, "+1.23%").unwrap();
    assert_eq!(buffer[(x, y)].fg, theme.positive);
    assert_ne!(buffer[(x, y)].fg, Color::Reset);
}

#[tokio::test]
async fn test_failed_section_shows_connection_banner() {
    let key = resource::market_climate();
    let mut store = store_with(FakeApi::new().failing(key.key()));
    assert!(store.cache.fetch(&key).await.is_err());
    store.reduce(Action::SetView(View::Climate));

    let buffer = draw(&store);
    assert!(find(&buffer, "Kunde inte ansluta till API:et.").is_some());
    assert!(find(&buffer, "Ingen anslutning").is_none());
}

#[tokio::test]
async fn test_empty_rocket_history_explains_itself() {
    let days = Config::default().ui.rocket_days;
    let api = FakeApi::new().route(
        resource::rocket_history(days).key(),
        json!({"history": [], "stats": {"total_picks": 0}}),
    );
    let mut store = store_with(api);
    store.cache.fetch(&resource::rocket_history(days)).await.unwrap();
    store.reduce(Action::SetView(View::Rockets));

    let buffer = draw(&store);
    assert!(find(&buffer, "Ingen rakethistorik ännu.").is_some());
}

#[tokio::test]
async fn test_help_overlay_lists_views() {
    let mut store = store_with(FakeApi::new());
    store.reduce(Action::ToggleHelp);

    let buffer = draw(&store);
    assert!(find(&buffer, "Hjälp").is_some());
    assert!(find(&buffer, "Navigering").is_some());
}
