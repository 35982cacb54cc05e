use heapless::{String, Vec};

/// Outcome of stepping toward newer history entries.
#[derive(Debug, PartialEq)]
pub enum Recall<'a> {
    /// Moved to a newer stored entry.
    Entry(&'a str),
    /// Stepped past the newest entry onto a fresh, empty line.
    Fresh,
    /// Already on the fresh line; nothing to do.
    End,
}

/// Ordered log of submitted lines with a browsing cursor.
///
/// `browse == len()` means "not recalling, editing a fresh line". The
/// log holds at most `DEPTH` entries; recording one more evicts the
/// oldest. Entries are snapshots, never aliases of the edit buffer.
pub struct History<const CAP: usize, const DEPTH: usize> {
    entries: Vec<String<CAP>, DEPTH>,
    browse: usize,
}

impl<const CAP: usize, const DEPTH: usize> History<CAP, DEPTH> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            browse: 0,
        }
    }

    /// Record a submitted line and leave browsing on the fresh line.
    pub fn record(&mut self, line: &str) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        if let Ok(entry) = String::try_from(line) {
            let _ = self.entries.push(entry);
        }
        self.browse = self.entries.len();
    }

    /// Step to the previous (older) entry. `None` when already at the
    /// oldest entry or when the history is empty; the caller leaves the
    /// line untouched.
    pub fn back(&mut self) -> Option<&str> {
        if self.browse == 0 {
            return None;
        }
        self.browse -= 1;
        Some(self.entries[self.browse].as_str())
    }

    /// Step toward the fresh line.
    pub fn forward(&mut self) -> Recall<'_> {
        if self.browse == self.entries.len() {
            return Recall::End;
        }
        self.browse += 1;
        if self.browse == self.entries.len() {
            Recall::Fresh
        } else {
            Recall::Entry(self.entries[self.browse].as_str())
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.as_str())
    }
}

impl<const CAP: usize, const DEPTH: usize> Default for History<CAP, DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
