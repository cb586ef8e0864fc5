//! # Console Handle
//!
//! The piece of the dashboard that is shared with the rest of the program.
//! Log producers, graph producers and command handlers all hold an
//! `Arc<Console>`; the session owns the terminal and reads from the same
//! handle when it paints.
//!
//! Channel switches requested from here (for example by a `graph` command)
//! are queued and picked up by the session on its next tick, so nothing
//! outside the render loop ever touches session state directly.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::core::graph::{Graph, GraphStore};
use crate::core::log_store::{DEFAULT_CHANNEL, EntryKind, LogStore};
use crate::core::region::{DirtyRegions, Regions};
use crate::core::state::View;

/// A queued request to change what the content region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRequest {
    pub channel: String,
    pub view: View,
}

pub struct Console {
    dirty: Arc<DirtyRegions>,
    logs: LogStore,
    graphs: GraphStore,
    pending: Mutex<Option<ChannelRequest>>,
    quit: AtomicBool,
}

impl Console {
    /// New console with every region scheduled for its first paint.
    pub fn new() -> Self {
        let dirty = Arc::new(DirtyRegions::new(Regions::all()));
        Self {
            logs: LogStore::new(dirty.clone()),
            dirty,
            graphs: GraphStore::new(),
            pending: Mutex::new(None),
            quit: AtomicBool::new(false),
        }
    }

    pub fn write(&self, kind: EntryKind, text: &str) {
        self.logs.write(kind, text);
    }

    pub fn write_to_channel(&self, channel: &str, kind: EntryKind, text: &str) {
        self.logs.write_to_channel(channel, kind, text);
    }

    pub fn set_channel_graph(&self, channel: &str, graph: Graph) {
        self.graphs.set_channel_graph(channel, graph);
        self.dirty.mark(Regions::CONTENT);
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub fn graphs(&self) -> &GraphStore {
        &self.graphs
    }

    pub fn dirty(&self) -> &DirtyRegions {
        &self.dirty
    }

    /// Show the log view of `channel` (the default channel when `None`).
    pub fn show_log(&self, channel: Option<&str>) {
        self.request(channel, View::Log);
    }

    /// Show the graph view of `channel` (the default channel when `None`).
    pub fn show_graph(&self, channel: Option<&str>) {
        self.request(channel, View::Graph);
    }

    /// The most recent unapplied request. Later requests replace earlier ones.
    pub fn take_channel_request(&self) -> Option<ChannelRequest> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Release);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }

    /// Every channel that has log entries or a graph.
    pub fn channels(&self) -> BTreeSet<String> {
        let mut channels = self.logs.snapshot().channels();
        channels.extend(self.graphs.channels());
        channels
    }

    fn request(&self, channel: Option<&str>, view: View) {
        let channel = channel.unwrap_or(DEFAULT_CHANNEL).to_string();
        debug!("Channel request: {channel} ({view:?})");
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(ChannelRequest { channel, view });
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_console_is_fully_dirty() {
        let console = Console::new();
        assert_eq!(console.dirty().pending(), Regions::all());
    }

    #[test]
    fn test_show_graph_defaults_to_main_channel() {
        let console = Console::new();
        console.show_graph(None);

        let request = console.take_channel_request().unwrap();
        assert_eq!(request.channel, DEFAULT_CHANNEL);
        assert_eq!(request.view, View::Graph);
        assert!(console.take_channel_request().is_none());
    }

    #[test]
    fn test_latest_request_wins() {
        let console = Console::new();
        console.show_graph(Some("cpu"));
        console.show_log(Some("net"));

        let request = console.take_channel_request().unwrap();
        assert_eq!(request.channel, "net");
        assert_eq!(request.view, View::Log);
    }

    #[test]
    fn test_channels_merges_logs_and_graphs() {
        let console = Console::new();
        console.write_to_channel("net", EntryKind::Message, "up");
        console.set_channel_graph("cpu", Graph::default());

        let channels: Vec<String> = console.channels().into_iter().collect();
        assert_eq!(channels, vec!["cpu", "net"]);
    }

    #[test]
    fn test_new_graph_marks_content() {
        let console = Console::new();
        console.dirty().take(Regions::all());

        console.set_channel_graph("cpu", Graph::default());
        assert_eq!(console.dirty().pending(), Regions::CONTENT);
        assert!(console.graphs().get("cpu").is_some());
    }

    #[test]
    fn test_quit_flag() {
        let console = Console::new();
        assert!(!console.quit_requested());
        console.request_quit();
        assert!(console.quit_requested());
    }
}
