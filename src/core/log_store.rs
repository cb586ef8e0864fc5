//! # Log Store
//!
//! Append-only, channel-tagged buffer of display lines.
//!
//! ```text
//! write_to_channel("net", Warning, "a very long line\nsecond")
//!        │
//!        ▼  split on '\n', cut to wrap width
//! ┌──────────────────────────────────────────┐
//! │ main  Message  "booting"                 │
//! │ net   Warning  "a very lo"               │
//! │ net   Warning  "ng line"                 │
//! │ net   Warning  "second"                  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Lines are wrapped once, at write time, against the width the renderer last
//! observed. A later resize does not rewrap stored entries.
//!
//! Writers and the render pass share one coarse lock. Entries never change
//! after they are appended, so the lock only has to cover "append a batch"
//! and "read a window".

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::region::{DirtyRegions, Regions};

/// Channel used by [`LogStore::write`] and for padding rows.
pub const DEFAULT_CHANNEL: &str = "main";

/// Wrap width used until the renderer reports the real terminal size.
pub const DEFAULT_WRAP_WIDTH: u16 = 79;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    #[default]
    Message,
    Warning,
    Error,
    Success,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub channel: String,
    pub kind: EntryKind,
    pub text: String,
}

impl LogEntry {
    pub fn new(channel: impl Into<String>, kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            kind,
            text: text.into(),
        }
    }

    /// Empty default-channel row used to pad a window.
    pub fn blank() -> Self {
        Self::new(DEFAULT_CHANNEL, EntryKind::Message, String::new())
    }
}

pub struct LogStore {
    entries: Mutex<Vec<LogEntry>>,
    wrap_width: AtomicU16,
    dirty: Arc<DirtyRegions>,
}

impl LogStore {
    pub fn new(dirty: Arc<DirtyRegions>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            wrap_width: AtomicU16::new(DEFAULT_WRAP_WIDTH),
            dirty,
        }
    }

    /// Record the usable line width. Clamped to at least one column.
    pub fn set_wrap_width(&self, width: u16) {
        self.wrap_width.store(width.max(1), Ordering::Relaxed);
    }

    pub fn wrap_width(&self) -> u16 {
        self.wrap_width.load(Ordering::Relaxed)
    }

    pub fn write(&self, kind: EntryKind, text: &str) {
        self.write_to_channel(DEFAULT_CHANNEL, kind, text);
    }

    pub fn write_to_channel(&self, channel: &str, kind: EntryKind, text: &str) {
        let width = self.wrap_width() as usize;

        // Build the batch outside the lock; only the append is exclusive.
        let batch: Vec<LogEntry> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .flat_map(|line| split_to_width(line, width))
            .map(|chunk| LogEntry::new(channel, kind, chunk))
            .collect();

        self.lock().extend(batch);
        self.dirty.mark(Regions::CONTENT);
    }

    pub fn count_for(&self, channel: &str) -> usize {
        self.snapshot().count_for(channel)
    }

    /// Owned copy of [`LogSnapshot::window_for`].
    pub fn window_for(&self, channel: &str, start: usize, count: usize) -> Vec<LogEntry> {
        self.snapshot()
            .window_for(channel, start, count)
            .map(Cow::into_owned)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hold the store lock for a whole render pass.
    pub fn snapshot(&self) -> LogSnapshot<'_> {
        LogSnapshot {
            entries: self.lock(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // Entries are immutable once pushed, so a panicked writer cannot
        // leave a half-built entry behind.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read access to the store while its lock is held.
pub struct LogSnapshot<'a> {
    entries: MutexGuard<'a, Vec<LogEntry>>,
}

impl LogSnapshot<'_> {
    pub fn count_for(&self, channel: &str) -> usize {
        self.entries.iter().filter(|e| e.channel == channel).count()
    }

    /// Exactly `count` rows: the channel's entries from its `start`-th entry
    /// on, then blank rows once the store runs out.
    pub fn window_for<'a>(
        &'a self,
        channel: &'a str,
        start: usize,
        count: usize,
    ) -> impl Iterator<Item = Cow<'a, LogEntry>> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.channel == channel)
            .skip(start)
            .map(Cow::Borrowed)
            .chain(std::iter::repeat_with(|| Cow::Owned(LogEntry::blank())))
            .take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct channel names, sorted.
    pub fn channels(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.channel.clone()).collect()
    }
}

/// Greedy cut into chunks no wider than `width` display columns. A glyph
/// wider than `width` on its own is replaced by U+FFFD.
fn split_to_width(line: &str, width: usize) -> Vec<Cow<'_, str>> {
    if line.width() <= width {
        return vec![Cow::Borrowed(line)];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (idx, ch) in line.char_indices() {
        let w = ch.width().unwrap_or(0);
        if w > width {
            if idx > start {
                chunks.push(Cow::Borrowed(&line[start..idx]));
            }
            chunks.push(Cow::Owned(char::REPLACEMENT_CHARACTER.to_string()));
            start = idx + ch.len_utf8();
            used = 0;
            continue;
        }
        if used + w > width && idx > start {
            chunks.push(Cow::Borrowed(&line[start..idx]));
            start = idx;
            used = 0;
        }
        used += w;
    }
    if start < line.len() {
        chunks.push(Cow::Borrowed(&line[start..]));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn store_with_width(width: u16) -> LogStore {
        let store = LogStore::new(Arc::new(DirtyRegions::default()));
        store.set_wrap_width(width);
        store
    }

    #[test]
    fn test_short_line_is_one_entry() {
        let store = store_with_width(20);
        store.write(EntryKind::Message, "hello");

        let entries = store.window_for(DEFAULT_CHANNEL, 0, 1);
        assert_eq!(store.count_for(DEFAULT_CHANNEL), 1);
        assert_eq!(entries[0].text, "hello");
    }

    #[test]
    fn test_double_width_line_splits_in_two() {
        let store = store_with_width(10);
        let line = "abcdefghijklmnopqrst";
        store.write_to_channel("net", EntryKind::Warning, line);

        let entries = store.window_for("net", 0, 2);
        assert_eq!(store.count_for("net"), 2);
        assert!(entries.iter().all(|e| e.text.len() <= 10));
        assert!(entries.iter().all(|e| e.kind == EntryKind::Warning));
        assert_eq!(format!("{}{}", entries[0].text, entries[1].text), line);
    }

    #[test]
    fn test_newlines_split_and_empty_lines_kept() {
        let store = store_with_width(40);
        store.write(EntryKind::Debug, "one\r\n\nthree");

        let texts: Vec<String> = store
            .window_for(DEFAULT_CHANNEL, 0, 3)
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec!["one", "", "three"]);
    }

    #[test]
    fn test_wide_chars_respect_display_width() {
        let store = store_with_width(4);
        store.write(EntryKind::Message, "日本語です");

        let entries = store.window_for(DEFAULT_CHANNEL, 0, 3);
        assert_eq!(store.count_for(DEFAULT_CHANNEL), 3);
        assert_eq!(entries[0].text, "日本");
        assert_eq!(entries[1].text, "語で");
        assert_eq!(entries[2].text, "す");
    }

    #[test]
    fn test_glyph_wider_than_wrap_width_is_replaced() {
        let store = store_with_width(1);
        store.write(EntryKind::Message, "a日本b");

        let texts: Vec<String> = store
            .window_for(DEFAULT_CHANNEL, 0, 4)
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec!["a", "\u{FFFD}", "\u{FFFD}", "b"]);
        assert!(texts.iter().all(|text| text.width() <= 1));
    }

    #[test]
    fn test_resize_does_not_rewrap() {
        let store = store_with_width(5);
        store.write(EntryKind::Message, "0123456789");
        store.set_wrap_width(80);
        store.write(EntryKind::Message, "0123456789");

        assert_eq!(store.count_for(DEFAULT_CHANNEL), 3);
    }

    #[test]
    fn test_window_pads_with_blank_default_entries() {
        let store = store_with_width(40);
        store.write_to_channel("net", EntryKind::Message, "a");
        store.write_to_channel("net", EntryKind::Message, "b");

        let window = store.window_for("net", 0, 5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].text, "a");
        assert_eq!(window[1].text, "b");
        for entry in &window[2..] {
            assert_eq!(*entry, LogEntry::blank());
        }
    }

    #[test]
    fn test_window_skips_other_channels() {
        let store = store_with_width(40);
        store.write_to_channel("a", EntryKind::Message, "a1");
        store.write_to_channel("b", EntryKind::Message, "b1");
        store.write_to_channel("a", EntryKind::Message, "a2");
        store.write_to_channel("a", EntryKind::Message, "a3");

        let window = store.window_for("a", 1, 2);
        assert_eq!(window[0].text, "a2");
        assert_eq!(window[1].text, "a3");
        assert_eq!(store.count_for("b"), 1);
    }

    #[test]
    fn test_write_marks_content_dirty() {
        let dirty = Arc::new(DirtyRegions::default());
        let store = LogStore::new(dirty.clone());

        store.write(EntryKind::Message, "x");
        assert_eq!(dirty.pending(), Regions::CONTENT);
    }

    #[test]
    fn test_zero_width_clamps_to_one() {
        let store = store_with_width(0);
        assert_eq!(store.wrap_width(), 1);
        store.write(EntryKind::Message, "abc");
        assert_eq!(store.count_for(DEFAULT_CHANNEL), 3);
    }

    #[test]
    fn test_concurrent_writers_are_counted_exactly() {
        let store = Arc::new(store_with_width(80));
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let store = store.clone();
                thread::spawn(move || {
                    let channel = if n % 2 == 0 { "even" } else { "odd" };
                    for i in 0..250 {
                        store.write_to_channel(channel, EntryKind::Message, &format!("{n}:{i}"));
                    }
                })
            })
            .collect();

        // Interleave reads with the writers
        for _ in 0..50 {
            let snapshot = store.snapshot();
            assert_eq!(snapshot.window_for("even", 0, 10).count(), 10);
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.count_for("even"), 500);
        assert_eq!(store.count_for("odd"), 500);
        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn test_snapshot_lists_channels() {
        let store = store_with_width(40);
        store.write_to_channel("zeta", EntryKind::Message, "z");
        store.write(EntryKind::Message, "m");
        store.write_to_channel("alpha", EntryKind::Message, "a");

        let channels: Vec<String> = store.snapshot().channels().into_iter().collect();
        assert_eq!(channels, vec!["alpha", "main", "zeta"]);
    }
}
