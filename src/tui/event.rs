use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Keys the dashboard reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Interrupt, // Ctrl+C; raw mode swallows SIGINT
}

/// Where the session reads keys from. `poll` must never block.
pub trait InputSource {
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Keyboard input from the real terminal via crossterm
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Option<InputEvent> {
        // Skip over events we don't map so a mouse move or key release
        // doesn't hide a key press queued behind it
        while event::poll(Duration::ZERO).unwrap_or(false) {
            let Ok(Event::Key(key_event)) = event::read() else {
                continue;
            };
            if key_event.kind == KeyEventKind::Release {
                continue;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            let mapped = match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(InputEvent::Interrupt),
                (_, KeyCode::Char(c)) => Some(InputEvent::Char(c)),
                (_, KeyCode::Backspace) => Some(InputEvent::Backspace),
                (_, KeyCode::Enter) => Some(InputEvent::Enter),
                (_, KeyCode::Esc) => Some(InputEvent::Escape),
                _ => None,
            };
            if mapped.is_some() {
                return mapped;
            }
        }
        None
    }
}

/// Scripted input for headless runs and tests
#[derive(Debug, Default)]
pub struct QueuedInput {
    queue: VecDeque<InputEvent>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Queue every character of `text` as a key press
    pub fn type_text(&mut self, text: &str) {
        self.queue.extend(text.chars().map(InputEvent::Char));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for QueuedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    fn poll(&mut self) -> Option<InputEvent> {
        (**self).poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_input_is_fifo() {
        let mut input = QueuedInput::new();
        input.type_text("ab");
        input.push(InputEvent::Enter);

        assert_eq!(input.poll(), Some(InputEvent::Char('a')));
        assert_eq!(input.poll(), Some(InputEvent::Char('b')));
        assert_eq!(input.poll(), Some(InputEvent::Enter));
        assert_eq!(input.poll(), None);
        assert!(input.is_empty());
    }
}
