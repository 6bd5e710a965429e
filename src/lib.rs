//! # Nordpuls - Swedish stock briefings in the terminal
//!
//! A terminal dashboard for a briefing API that serves pre-computed morning
//! and evening briefings, stock quotes and signals, congressional trading
//! statistics and market-climate indicators. Built with ratatui and tokio.
//!
//! ## Architecture
//!
//! - **App**: terminal lifecycle and the render/select loop
//! - **API**: the HTTP client behind the [`api::Transport`] seam
//! - **Resource**: keyed, coalesced, polled remote data
//! - **State**: the store, its actions and per-view state
//! - **Events**: key and focus input mapped to actions
//! - **UI**: layout, widgets and one page per view
//! - **Market**: Stockholm session status, formatting and tones
//! - **Config**: layered file and environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod market;
pub mod models;
pub mod resource;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
