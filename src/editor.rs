use embedded_io_async::Write as AsyncWrite;

use crate::buffer::EditBuffer;
use crate::classifier::{EscapeClassifier, Key};
use crate::dispatch::Command;
use crate::history::{History, Recall};
use crate::writer::TerminalWriter;

/// Configuration for the line editor.
#[derive(Clone, Copy)]
pub struct EditorConfig {
    /// Prompt string displayed at the start of every line.
    pub prompt: &'static str,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { prompt: "> " }
    }
}

/// Translates classified input into edit-buffer mutations and emits the
/// minimal redraw keeping the remote terminal's line in sync with the
/// buffer and cursor.
///
/// `CAP` bounds the line length, `DEPTH` the history size. The editor
/// never blocks: each byte is handled to completion, and committed lines
/// are returned to the caller as [`Command`]s instead of being executed
/// inline.
pub struct LineEditor<const CAP: usize, const DEPTH: usize> {
    config: EditorConfig,
    buffer: EditBuffer<CAP>,
    history: History<CAP, DEPTH>,
    classifier: EscapeClassifier,
}

impl<const CAP: usize, const DEPTH: usize> LineEditor<CAP, DEPTH> {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            buffer: EditBuffer::new(),
            history: History::new(),
            classifier: EscapeClassifier::new(),
        }
    }

    /// The line currently being edited.
    pub fn line(&self) -> &str {
        self.buffer.as_str()
    }

    /// Cursor offset within the line.
    pub fn cursor(&self) -> usize {
        self.buffer.position()
    }

    pub fn prompt(&self) -> &'static str {
        self.config.prompt
    }

    pub fn history(&self) -> &History<CAP, DEPTH> {
        &self.history
    }

    /// Process one raw input byte: classify it, apply the buffer effect,
    /// and mirror it on the terminal. Returns a [`Command`] when the byte
    /// committed the line; the buffer is already cleared by then, so the
    /// caller can defer execution without re-entrancy concerns.
    pub async fn handle_byte<W: AsyncWrite>(
        &mut self,
        byte: u8,
        writer: &mut TerminalWriter<'_, W>,
    ) -> Result<Option<Command<CAP>>, W::Error> {
        let key = match self.classifier.feed(byte) {
            Some(key) => key,
            None => return Ok(None),
        };

        match key {
            Key::SequenceStart => {
                writer.save_cursor().await?;
            }
            Key::Char(c) => {
                let at_end = self.buffer.at_end();
                if self.line_has_room() && self.buffer.insert(c) {
                    if at_end {
                        writer.write_bytes(&[c]).await?;
                    } else {
                        self.redraw(writer).await?;
                    }
                }
            }
            Key::Tab => {
                // Echo intentionally suppressed for tabs.
                if self.line_has_room() {
                    let _ = self.buffer.insert(b'\t');
                }
            }
            Key::Backspace => {
                let at_end = self.buffer.at_end();
                if self.buffer.delete_before() {
                    if at_end {
                        writer.erase_last_char().await?;
                    } else {
                        self.redraw(writer).await?;
                    }
                }
            }
            Key::ArrowLeft => {
                let position = self.buffer.position();
                if position == 0 {
                    writer.restore_cursor().await?;
                } else {
                    self.buffer.set_position(position - 1);
                    writer.write_escape(b"[D").await?;
                }
            }
            Key::ArrowRight => {
                let position = self.buffer.position();
                if position == self.buffer.len() {
                    writer.restore_cursor().await?;
                } else {
                    self.buffer.set_position(position + 1);
                    writer.write_escape(b"[C").await?;
                }
            }
            Key::ArrowUp => {
                writer.restore_cursor().await?;
                if let Some(entry) = self.history.back() {
                    self.buffer.replace(entry);
                    self.redraw(writer).await?;
                }
            }
            Key::ArrowDown => {
                writer.restore_cursor().await?;
                match self.history.forward() {
                    Recall::Entry(entry) => {
                        self.buffer.replace(entry);
                        self.redraw(writer).await?;
                    }
                    Recall::Fresh => {
                        self.buffer.clear();
                        self.redraw(writer).await?;
                    }
                    Recall::End => {}
                }
            }
            Key::Submit => {
                writer.write_str("\r\n").await?;
                let line = self.buffer.take();
                self.history.record(&line);
                return Ok(Some(Command::Run(line)));
            }
            Key::Persist => {
                writer.write_str("\r\n").await?;
                // Always fits: insertion keeps the final byte free for
                // this terminator.
                let _ = self.buffer.append(0x00);
                let line = self.buffer.take();
                return Ok(Some(Command::Store(line)));
            }
            Key::Passthrough(sequence) => {
                writer.write_escape(&sequence).await?;
            }
        }

        Ok(None)
    }

    /// Rewrite the whole line: clear, prompt, content, and reposition the
    /// visible cursor via its absolute column when it is not at the end.
    /// Absolute positioning avoids drift from accumulated relative moves.
    pub async fn redraw<W: AsyncWrite>(
        &self,
        writer: &mut TerminalWriter<'_, W>,
    ) -> Result<(), W::Error> {
        writer.clear_line().await?;
        writer.write_prompt(self.config.prompt).await?;
        writer.write_str(self.buffer.as_str()).await?;
        if !self.buffer.at_end() {
            writer.move_to_column(self.cursor_column()).await?;
        }
        Ok(())
    }

    /// 1-based terminal column of the logical cursor.
    fn cursor_column(&self) -> usize {
        self.config.prompt.len() + self.buffer.position() + 1
    }

    /// Whether another byte may be typed. The last byte of capacity
    /// stays reserved for the persist NUL terminator, so a `Store`
    /// payload is NUL-terminated even when the line was typed full.
    fn line_has_room(&self) -> bool {
        self.buffer.len() + 1 < CAP
    }
}
