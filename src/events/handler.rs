//! Event handler for processing input events.

use super::{EventConfig, InputEvent};
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};

/// Handles input events and produces actions.
pub struct EventHandler {
    config: EventConfig,
    /// Key bindings.
    keybindings: KeyBindings,
    /// Store reference for state-aware handling.
    store_snapshot: StoreSnapshot,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Default)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    show_help: bool,
}

impl EventHandler {
    pub fn new(config: EventConfig, keybindings: KeyBindings) -> Self {
        Self {
            config,
            keybindings,
            store_snapshot: StoreSnapshot::default(),
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            show_help: store.app.show_help,
        };
    }

    /// Get the next action from user input, or a tick once the tick rate elapses.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if !event::poll(self.config.tick_rate)? {
            return Ok(Some(Action::Tick));
        }

        let action = match event::read()? {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(mouse) if self.config.mouse_capture => self.handle_mouse(mouse),
            CrosstermEvent::FocusGained => Some(Action::FocusGained),
            // Terminal will automatically redraw
            _ => None,
        };
        Ok(action)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.store_snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Search => self.handle_search_mode(key),
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);
        let bindings = &self.keybindings;

        // Global shortcuts
        if input.matches(&bindings.quit) || (input.ctrl() && input.char() == Some('c')) {
            return Some(Action::Quit);
        }
        if input.matches(&bindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&bindings.back) {
            return Some(Action::Back);
        }
        if self.store_snapshot.show_help {
            return None;
        }
        if input.matches(&bindings.refresh) {
            return Some(Action::RefreshAll);
        }

        // View switching
        let tabs = [
            (&bindings.dashboard, View::Dashboard),
            (&bindings.morning, View::MorningBrief),
            (&bindings.evening, View::EveningBrief),
            (&bindings.rockets, View::Rockets),
            (&bindings.simulator, View::Simulator),
            (&bindings.congress, View::Congress),
            (&bindings.climate, View::Climate),
            (&bindings.watchlist, View::Watchlist),
        ];
        if let Some((_, view)) = tabs.iter().find(|(binding, _)| input.matches(binding)) {
            return Some(Action::SetView(*view));
        }
        if key.code == KeyCode::Tab {
            return Some(Action::SetView(self.adjacent_tab(1)));
        }
        if key.code == KeyCode::BackTab {
            return Some(Action::SetView(self.adjacent_tab(-1)));
        }

        // Navigation
        if input.matches(&bindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&bindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if input.matches(&bindings.left) || key.code == KeyCode::Left {
            return Some(Action::PrevOption);
        }
        if input.matches(&bindings.right) || key.code == KeyCode::Right {
            return Some(Action::NextOption);
        }
        if input.matches(&bindings.select) {
            return Some(Action::OpenSelected);
        }

        match key.code {
            KeyCode::PageUp => return Some(Action::PageUp),
            KeyCode::PageDown => return Some(Action::PageDown),
            KeyCode::Home => return Some(Action::GoToTop),
            KeyCode::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // Dashboard only
        if self.store_snapshot.current_view == View::Dashboard {
            if input.matches(&bindings.search) {
                return Some(Action::SetInputMode(InputMode::Search));
            }
            if input.matches(&bindings.next_page) {
                return Some(Action::NextPage);
            }
            if input.matches(&bindings.prev_page) {
                return Some(Action::PrevPage);
            }
        }

        None
    }

    fn handle_search_mode(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelSearch),
            KeyCode::Enter => Some(Action::SubmitSearch),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) if !InputEvent::from(key).ctrl() => Some(Action::InputChar(c)),
            _ => None,
        }
    }

    fn adjacent_tab(&self, delta: i32) -> View {
        let tabs = View::TABS;
        let current = self
            .store_snapshot
            .current_view
            .tab()
            .and_then(|tab| tabs.iter().position(|v| *v == tab))
            .unwrap_or(0);
        let len = tabs.len() as i32;
        tabs[(current as i32 + delta).rem_euclid(len) as usize]
    }
}
