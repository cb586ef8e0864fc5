//! # TUI Adapter
//!
//! The terminal side of the dashboard. Owns the terminal surface, reads the
//! keyboard, and repaints whatever the shared [`Console`] marked dirty.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Tick
//!
//! Everything happens in [`Session::tick`], called at the frame rate:
//!
//! 1. Apply a queued channel switch (from a command or another thread).
//! 2. Unless still booting, drain pending keys.
//! 3. Once per animation interval, advance the animation tick and mark the
//!    prompt.
//! 4. If any region is dirty, run one render pass while holding the log
//!    store lock.
//!
//! Producers never wait on the render loop beyond that lock; they only append
//! entries and flip dirty bits.

mod component;
mod components;
mod event;
mod input;
mod render;
mod surface;
mod theme;

pub use component::{Component, EventHandler};
pub use components::logo::LOGO_HEIGHT;
pub use components::status_line::GRAPH_HINT;
pub use event::{InputEvent, InputSource, QueuedInput, TerminalInput};
pub use input::PromptEdit;
pub use render::{Renderer, ScreenLayout};
pub use surface::Surface;
pub use theme::{Role, Theme};

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::Show;
use crossterm::execute;
use log::{debug, info};
use ratatui::backend::Backend;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::time::MissedTickBehavior;

use crate::core::command::CommandDispatcher;
use crate::core::config::{Palette, ResolvedConfig};
use crate::core::console::Console;
use crate::core::log_store::DEFAULT_CHANNEL;
use crate::core::region::Regions;
use crate::core::state::{SessionState, View};

/// The parts of the resolved config a session needs.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub start_channel: String,
    pub boot_message: String,
    pub animation_interval: Duration,
    pub palette: Palette,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            start_channel: DEFAULT_CHANNEL.to_string(),
            boot_message: crate::core::config::DEFAULT_BOOT_MESSAGE.to_string(),
            animation_interval: Duration::from_secs(1),
            palette: Palette::Named,
        }
    }
}

impl From<&ResolvedConfig> for SessionOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            start_channel: config.start_channel.clone(),
            boot_message: config.boot_message.clone(),
            animation_interval: config.animation_interval,
            palette: config.palette,
        }
    }
}

pub struct Session<B: Backend, I: InputSource> {
    console: Arc<Console>,
    state: SessionState,
    surface: Surface<B>,
    input: I,
    renderer: Renderer,
    dispatcher: Option<Box<dyn CommandDispatcher>>,
    animation_interval: Duration,
    last_animation: Option<Instant>,
}

impl<B: Backend, I: InputSource> Session<B, I> {
    pub fn new(console: Arc<Console>, surface: Surface<B>, input: I, options: SessionOptions) -> Self {
        Self {
            console,
            state: SessionState::new(options.start_channel),
            surface,
            input,
            renderer: Renderer::new(Theme::new(options.palette), options.boot_message),
            dispatcher: None,
            animation_interval: options.animation_interval,
            last_animation: None,
        }
    }

    /// Attach the dispatcher and end the boot phase. The boot log keeps
    /// scrolling until it has played out once.
    pub fn mark_ready(&mut self, dispatcher: Box<dyn CommandDispatcher>) {
        info!("Session ready on channel '{}'", self.state.current_channel);
        self.dispatcher = Some(dispatcher);
        self.state.ready = true;
        self.state.initializing = false;
        self.console.dirty().mark(Regions::all());
    }

    /// Show `view` of `channel`. A view change repaints the prompt, a channel
    /// change repaints the content.
    pub fn switch_channel(&mut self, channel: &str, view: View) {
        let view_changed = self.state.current_view != view;
        let channel_changed = self.state.current_channel != channel;
        if !view_changed && !channel_changed {
            return;
        }
        debug!("Switching to '{channel}' ({view:?})");

        if view_changed {
            self.state.current_view = view;
            self.console.dirty().mark(Regions::PROMPT);
        }
        if channel_changed {
            self.state.current_channel = channel.to_string();
            self.console.dirty().mark(Regions::CONTENT);
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// [`Session::tick`] with an explicit clock.
    pub fn tick_at(&mut self, now: Instant) {
        self.apply_channel_request();

        if !self.state.initializing {
            self.poll_input();
        }

        let animate = self
            .last_animation
            .is_none_or(|last| now.saturating_duration_since(last) >= self.animation_interval);
        if animate {
            self.last_animation = Some(now);
            self.state.animation_tick = self.state.animation_tick.wrapping_add(1);
            self.console.dirty().mark(Regions::PROMPT);
        }

        if !self.console.dirty().is_empty() {
            let logs = self.console.logs().snapshot();
            self.renderer
                .redraw(&mut self.surface, &mut self.state, &self.console, &logs);
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn surface(&self) -> &Surface<B> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface<B> {
        &mut self.surface
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    pub fn quit_requested(&self) -> bool {
        self.console.quit_requested()
    }

    fn apply_channel_request(&mut self) {
        if let Some(request) = self.console.take_channel_request() {
            self.switch_channel(&request.channel, request.view);
        }
    }
}

struct CursorGuard;

impl Drop for CursorGuard {
    fn drop(&mut self) {
        // Every render pass hides the cursor
        let _ = execute!(stdout(), Show);
    }
}

/// Take over the terminal and run the dashboard until a quit is requested.
///
/// `dispatcher` is attached once `boot_done` fires (or its sender is dropped).
pub async fn run(
    config: &ResolvedConfig,
    console: Arc<Console>,
    dispatcher: Box<dyn CommandDispatcher>,
    boot_done: oneshot::Receiver<()>,
) -> std::io::Result<()> {
    let terminal = ratatui::init();
    let _cursor_guard = CursorGuard;
    info!("Terminal initialised, frame interval {:?}", config.frame_interval);

    let mut session = Session::new(
        console,
        Surface::new(terminal),
        TerminalInput,
        SessionOptions::from(config),
    );

    let mut frames = tokio::time::interval(config.frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut boot_done = Some(boot_done);
    let mut dispatcher = Some(dispatcher);

    while !session.quit_requested() {
        frames.tick().await;

        let booted = boot_done
            .as_mut()
            .is_some_and(|rx| !matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        if booted {
            boot_done = None;
            if let Some(dispatcher) = dispatcher.take() {
                session.mark_ready(dispatcher);
            }
        }

        session.tick();
    }

    info!("Leaving dashboard");
    ratatui::restore();
    Ok(())
}
