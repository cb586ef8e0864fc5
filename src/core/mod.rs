//! # Core Dashboard Logic
//!
//! Everything the dashboard knows that is not about drawing.
//! It knows nothing about ratatui or crossterm.
//!
//! ```text
//!     producers (threads, tasks)          command handlers
//!              │ write / set_channel_graph        │ show_log / show_graph
//!              ▼                                  ▼
//!     ┌──────────────────────────────────────────────────┐
//!     │                   Console                        │
//!     │  • LogStore     (append-only, channel tagged)    │
//!     │  • GraphStore   (one series per channel)         │
//!     │  • DirtyRegions (atomic repaint flags)           │
//!     └────────────────────────┬─────────────────────────┘
//!                              │ read-only during paint
//!                              ▼
//!                    ┌───────────────────┐
//!                    │   tui::Session    │
//!                    │  (SessionState)   │
//!                    └───────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`console`]: the shared handle producers and commands hold
//! - [`log_store`]: line-wrapped, channel-filtered log buffer
//! - [`graph`]: per-channel numeric series
//! - [`region`]: dirty flags driving selective repaint
//! - [`state`]: the session's own state (`SessionState`, `View`)
//! - [`prompt`]: the prompt line buffer
//! - [`command`]: the dispatcher contract and its error type
//! - [`commands`]: the built-in dispatcher
//! - [`config`]: settings and their override hierarchy

pub mod command;
pub mod commands;
pub mod config;
pub mod console;
pub mod graph;
pub mod log_store;
pub mod prompt;
pub mod region;
pub mod state;
