//! # Session State
//!
//! Everything the dashboard remembers between ticks, apart from the shared
//! stores in [`Console`](crate::core::console::Console).
//!
//! ```text
//! SessionState
//! ├── current_channel: String   // channel shown by both views
//! ├── current_view: View        // Log or Graph
//! ├── scroll_offset: usize      // first visible log row (channel-relative)
//! ├── prompt: PromptBuffer      // text after the `>` caret
//! ├── animation_tick: u64       // drives the ellipsis and cursor blink
//! ├── ready: bool               // boot log still playing after mark_ready
//! └── initializing: bool        // true until mark_ready
//! ```

use crate::core::log_store::DEFAULT_CHANNEL;
use crate::core::prompt::PromptBuffer;

/// Which content renderer owns the content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Log,
    Graph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_channel: String,
    pub current_view: View,
    pub scroll_offset: usize,
    pub prompt: PromptBuffer,
    pub animation_tick: u64,
    pub ready: bool,
    pub initializing: bool,
}

impl SessionState {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            current_channel: channel.into(),
            current_view: View::Log,
            scroll_offset: 0,
            prompt: PromptBuffer::new(),
            animation_tick: 0,
            ready: false,
            initializing: true,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_defaults() {
        let state = SessionState::default();
        assert_eq!(state.current_channel, "main");
        assert_eq!(state.current_view, View::Log);
        assert!(state.initializing);
        assert!(!state.ready);
        assert!(state.prompt.is_empty());
    }
}
