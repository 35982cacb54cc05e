use heapless::Vec;

/// Longest escape-sequence payload retained between the ESC byte and its
/// terminating letter. Longer sequences are discarded.
pub const MAX_SEQUENCE: usize = 8;

/// A classified unit of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// Printable byte to insert at the cursor.
    Char(u8),
    Tab,
    Backspace,
    /// Carriage return or line feed: run the current line.
    Submit,
    /// Ctrl-F: persist the current line to flash.
    Persist,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// ESC received, a sequence is now being collected. The renderer
    /// should save the terminal cursor so it can be restored if the
    /// sequence resolves to a boundary no-op.
    SequenceStart,
    /// An escape sequence this state machine does not model: the bytes
    /// after the ESC, terminator included, to be replayed verbatim so the
    /// remote terminal can interpret them itself.
    Passthrough(Vec<u8, MAX_SEQUENCE>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Normal,
    Collecting,
}

/// Incremental classifier for the raw byte stream.
///
/// Escape sequences start with ESC (0x1B) and end at the first ASCII
/// letter; this is the accepted terminator convention for the supported
/// grammar, not a general ANSI parser. Only the four two-byte arrow
/// sequences are recognized. Every byte value maps to a defined outcome.
pub struct EscapeClassifier {
    state: State,
    pending: Vec<u8, MAX_SEQUENCE>,
}

impl EscapeClassifier {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            pending: Vec::new(),
        }
    }

    /// Feed one byte. Returns `Some` when the byte resolves into an
    /// actionable key, `None` while a sequence is still being collected
    /// or for control bytes with no assigned meaning.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        match self.state {
            State::Normal => match byte {
                b'\r' | b'\n' => Some(Key::Submit),
                0x06 => Some(Key::Persist),
                0x09 => Some(Key::Tab),
                0x08 | 0x7F => Some(Key::Backspace),
                0x1B => {
                    self.state = State::Collecting;
                    Some(Key::SequenceStart)
                }
                byte if byte >= 0x20 => Some(Key::Char(byte)),
                _ => None,
            },
            State::Collecting => {
                if self.pending.push(byte).is_err() {
                    // Sequence too long for the supported grammar.
                    self.pending.clear();
                    self.state = State::Normal;
                    return None;
                }
                if byte.is_ascii_alphabetic() {
                    self.state = State::Normal;
                    let sequence = core::mem::take(&mut self.pending);
                    Some(Self::classify(sequence))
                } else {
                    None
                }
            }
        }
    }

    fn classify(sequence: Vec<u8, MAX_SEQUENCE>) -> Key {
        match sequence.as_slice() {
            [0x5B, 0x41] => Key::ArrowUp,
            [0x5B, 0x42] => Key::ArrowDown,
            [0x5B, 0x44] => Key::ArrowLeft,
            [0x5B, 0x43] => Key::ArrowRight,
            _ => Key::Passthrough(sequence),
        }
    }
}

impl Default for EscapeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
