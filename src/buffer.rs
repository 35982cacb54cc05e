use heapless::{String, Vec};

/// Cursor-addressed edit buffer holding the line currently being typed.
///
/// The buffer is the unit of truth for what the user has entered.
/// Rendering is the caller's responsibility, keeping this type free of
/// transport concerns. The cursor always stays within `0..=len()`.
pub struct EditBuffer<const CAP: usize> {
    bytes: Vec<u8, CAP>,
    position: usize,
}

impl<const CAP: usize> EditBuffer<CAP> {
    /// Create an empty buffer with the cursor at 0.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            position: 0,
        }
    }

    /// Insert a byte at the cursor, shifting the tail right and advancing
    /// the cursor. Returns `false` when the buffer is at capacity and the
    /// byte was dropped.
    pub fn insert(&mut self, byte: u8) -> bool {
        if self.position == self.bytes.len() {
            if self.bytes.push(byte).is_err() {
                return false;
            }
        } else if self.bytes.insert(self.position, byte).is_err() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Append a byte at the end of the line regardless of the cursor.
    /// Used for the NUL terminator on persist.
    pub fn append(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    /// Remove the byte immediately before the cursor and move the cursor
    /// back by one. A deliberate no-op at the start of the line or on an
    /// empty buffer; returns whether anything was removed.
    pub fn delete_before(&mut self) -> bool {
        if self.position == 0 || self.bytes.is_empty() {
            return false;
        }
        self.bytes.remove(self.position - 1);
        self.position -= 1;
        true
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor, clamped to the buffer length.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.bytes.len());
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the cursor sits at the end of the line.
    pub fn at_end(&self) -> bool {
        self.position == self.bytes.len()
    }

    /// View the buffer as text. Invalid UTF-8 (possible if the wire
    /// delivers stray high bytes) degrades to an empty view rather than
    /// an error.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes).unwrap_or("")
    }

    /// Replace the whole line, e.g. with a recalled history entry. The
    /// cursor moves to the end of the new content.
    pub fn replace(&mut self, content: &str) {
        self.bytes.clear();
        let _ = self.bytes.extend_from_slice(content.as_bytes());
        self.position = self.bytes.len();
    }

    /// Snapshot the line as an owned string and reset to empty.
    pub fn take(&mut self) -> String<CAP> {
        let snapshot = String::from_utf8(self.bytes.clone()).unwrap_or_default();
        self.clear();
        snapshot
    }

    /// Empty the buffer and reset the cursor to 0.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.position = 0;
    }
}

impl<const CAP: usize> Default for EditBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_end_appends() {
        let mut buffer = EditBuffer::<16>::new();
        assert!(buffer.insert(b'a'));
        assert!(buffer.insert(b'b'));
        assert_eq!(buffer.as_str(), "ab");
        assert_eq!(buffer.position(), 2);
        assert!(buffer.at_end());
    }

    #[test]
    fn insert_mid_line_shifts_tail() {
        let mut buffer = EditBuffer::<16>::new();
        buffer.insert(b'a');
        buffer.insert(b'b');
        buffer.set_position(1);
        assert!(buffer.insert(b'X'));
        assert_eq!(buffer.as_str(), "aXb");
        assert_eq!(buffer.position(), 2);
    }

    #[test]
    fn position_stays_within_bounds() {
        let mut buffer = EditBuffer::<16>::new();
        buffer.insert(b'a');
        buffer.set_position(10);
        assert_eq!(buffer.position(), 1);
        for byte in b"bcd" {
            buffer.insert(*byte);
        }
        assert!(buffer.position() <= buffer.len());
    }

    #[test]
    fn delete_before_removes_and_retreats() {
        let mut buffer = EditBuffer::<16>::new();
        buffer.insert(b'a');
        buffer.insert(b'b');
        assert!(buffer.delete_before());
        assert_eq!(buffer.as_str(), "a");
        assert_eq!(buffer.position(), 1);
    }

    #[test]
    fn delete_before_is_noop_at_start_and_when_empty() {
        let mut buffer = EditBuffer::<16>::new();
        assert!(!buffer.delete_before());
        buffer.insert(b'a');
        buffer.set_position(0);
        assert!(!buffer.delete_before());
        assert_eq!(buffer.as_str(), "a");
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn insert_when_full_is_dropped() {
        let mut buffer = EditBuffer::<2>::new();
        assert!(buffer.insert(b'a'));
        assert!(buffer.insert(b'b'));
        assert!(!buffer.insert(b'c'));
        assert_eq!(buffer.as_str(), "ab");
        assert_eq!(buffer.position(), 2);
    }

    #[test]
    fn take_snapshots_and_clears() {
        let mut buffer = EditBuffer::<16>::new();
        buffer.insert(b'h');
        buffer.insert(b'i');
        let line = buffer.take();
        assert_eq!(line.as_str(), "hi");
        assert!(buffer.is_empty());
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn replace_moves_cursor_to_end() {
        let mut buffer = EditBuffer::<16>::new();
        buffer.insert(b'z');
        buffer.replace("recalled");
        assert_eq!(buffer.as_str(), "recalled");
        assert_eq!(buffer.position(), 8);
    }
}
