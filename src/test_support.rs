//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use ratatui::backend::TestBackend;

use crate::core::command::{CommandDispatcher, CommandError};
use crate::core::console::Console;
use crate::tui::{LOGO_HEIGHT, QueuedInput, Session, SessionOptions, Surface};

pub type HeadlessSession = Session<TestBackend, QueuedInput>;

/// Terminal height that leaves `page` rows for the content region.
pub fn page_rows(page: u16) -> u16 {
    LOGO_HEIGHT + 3 + page
}

/// A session on a fresh console, drawing to a `TestBackend`.
pub fn headless_session(width: u16, height: u16) -> HeadlessSession {
    Session::new(
        Arc::new(Console::new()),
        Surface::headless(width, height),
        QueuedInput::new(),
        SessionOptions::default(),
    )
}

/// Records every line it is given and answers with a canned result.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    pub lines: Arc<Mutex<Vec<String>>>,
    pub reject_with: Option<String>,
}

impl CommandDispatcher for RecordingDispatcher {
    fn execute(&mut self, line: &str) -> Result<(), CommandError> {
        self.lines.lock().unwrap().push(line.to_string());
        match &self.reject_with {
            Some(message) => Err(CommandError::BadCommand(message.clone())),
            None => Ok(()),
        }
    }
}
