//! Main application module.
//!
//! `App` owns the terminal, the store and the event handler and runs the
//! render/select loop until the user quits.

use crate::api::ApiClientBuilder;
use crate::config::Config;
use crate::error::Result;
use crate::events::{EventConfig, EventHandler};
use crate::resource::ResourceCache;
use crate::state::{Action, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    store: Store,
    event_handler: EventHandler,
    /// Settled resources and other deferred actions.
    action_rx: mpsc::UnboundedReceiver<Action>,
    mouse_capture: bool,
}

impl App {
    /// Build the API client and store, then take over the terminal.
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClientBuilder::new().config(config.api.clone()).build()?;
        tracing::info!(base_url = %client.base_url(), "Starting Nordpuls");
        let cache = ResourceCache::new(Arc::new(client));

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = Store::new(action_tx, cache, &config);

        let mouse_capture = config.ui.mouse_support;
        let event_config = EventConfig::default()
            .with_tick_rate_ms(config.ui.tick_rate_ms)
            .with_mouse_capture(mouse_capture);
        let event_handler = EventHandler::new(event_config, config.keybindings.clone());

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
        if mouse_capture {
            execute!(stdout, EnableMouseCapture)?;
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            mouse_capture,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Mount what the current view reads before drawing it.
            self.store.sync_subscriptions();
            self.event_handler.update_store_snapshot(&self.store);

            self.terminal.draw(|frame| Ui::render(frame, &self.store))?;

            tokio::select! {
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.store.reduce(action);
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.store.reduce(action);
                }
            }

            if self.store.app.should_quit {
                tracing::info!("Shutting down");
                break;
            }
        }

        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.mouse_capture {
            let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture);
        }
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}
