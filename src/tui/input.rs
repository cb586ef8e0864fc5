//! # Prompt Input
//!
//! Turns key presses into prompt edits, and submitted lines into dispatcher
//! calls.
//!
//! ```text
//! InputEvent ──► PromptBuffer::handle_event ──► PromptEdit
//!                                                 │
//!                         Changed ◄───────────────┤
//!                         Submit(line) ──► echo, dispatch, report failure
//! ```
//!
//! The submitted line is echoed to the current channel. Dispatcher failures
//! stop here: a bad command becomes a Warning entry, any other failure an
//! Error entry with its full cause chain, both on the default channel, and
//! the session keeps running either way.

use log::{debug, error, warn};
use ratatui::backend::Backend;

use crate::core::command::CommandError;
use crate::core::log_store::EntryKind;
use crate::core::prompt::PromptBuffer;
use crate::core::region::Regions;
use crate::core::state::View;
use crate::tui::Session;
use crate::tui::component::EventHandler;
use crate::tui::event::{InputEvent, InputSource};

/// What a key press did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEdit {
    Changed,
    Submit(String),
}

impl EventHandler for PromptBuffer {
    type Event = PromptEdit;

    fn handle_event(&mut self, event: &InputEvent) -> Option<PromptEdit> {
        match event {
            InputEvent::Char(ch) => self.push(*ch).then_some(PromptEdit::Changed),
            InputEvent::Backspace => self.backspace().then_some(PromptEdit::Changed),
            InputEvent::Enter => self.take().map(PromptEdit::Submit),
            InputEvent::Escape | InputEvent::Interrupt => None,
        }
    }
}

impl<B: Backend, I: InputSource> Session<B, I> {
    /// Drain every key that is already waiting. Never blocks.
    pub(crate) fn poll_input(&mut self) {
        while let Some(event) = self.input.poll() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if event == InputEvent::Interrupt {
            debug!("Interrupt from keyboard");
            self.console.request_quit();
            return;
        }

        if self.state.current_view == View::Graph {
            if event == InputEvent::Escape {
                let channel = self.state.current_channel.clone();
                self.switch_channel(&channel, View::Log);
                self.console.dirty().mark(Regions::PROMPT | Regions::CONTENT);
            }
            return;
        }

        match self.state.prompt.handle_event(&event) {
            Some(PromptEdit::Changed) => self.console.dirty().mark(Regions::PROMPT),
            Some(PromptEdit::Submit(line)) => {
                self.submit(&line);
                self.console.dirty().mark(Regions::PROMPT);
            }
            None => {}
        }
    }

    fn submit(&mut self, line: &str) {
        let channel = self.state.current_channel.clone();
        self.console
            .write_to_channel(&channel, EntryKind::Message, line);

        let Some(dispatcher) = self.dispatcher.as_mut() else {
            debug!("No dispatcher attached, dropping '{line}'");
            return;
        };

        match dispatcher.execute(line) {
            Ok(()) => {}
            Err(CommandError::BadCommand(message)) => {
                warn!("Bad command '{line}': {message}");
                self.console.write(EntryKind::Warning, &message);
            }
            Err(err) => {
                let detail = err.detail();
                error!("Command '{line}' failed: {detail}");
                self.console.write(EntryKind::Error, &detail);
            }
        }

        self.apply_channel_request();
    }
}
