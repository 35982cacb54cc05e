use embedded_io_async::Write as AsyncWrite;

/// Terminal writer emitting ANSI control sequences over the output stream.
///
/// Every redraw the editor performs goes through here, so the methods map
/// one-to-one onto the control codes the remote terminal must see:
/// `ESC[s`/`ESC[u` save/restore, `ESC[2K\r` clear line, `ESC[<n>G`
/// absolute column, SGR color codes.
pub struct TerminalWriter<'a, W: AsyncWrite> {
    writer: &'a mut W,
}

impl<'a, W: AsyncWrite> TerminalWriter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// Write a string.
    pub async fn write_str(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_all(s.as_bytes()).await?;
        self.writer.flush().await
    }

    /// Write raw bytes.
    pub async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), W::Error> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await
    }

    /// Write the prompt.
    pub async fn write_prompt(&mut self, prompt: &str) -> Result<(), W::Error> {
        self.write_str(prompt).await
    }

    /// Clear the whole line and return to column 0.
    pub async fn clear_line(&mut self) -> Result<(), W::Error> {
        self.write_str("\x1b[2K\r").await
    }

    /// Save the terminal cursor position.
    pub async fn save_cursor(&mut self) -> Result<(), W::Error> {
        self.write_str("\x1b[s").await
    }

    /// Restore the previously saved cursor position.
    pub async fn restore_cursor(&mut self) -> Result<(), W::Error> {
        self.write_str("\x1b[u").await
    }

    /// Move the cursor to an absolute 1-based column.
    pub async fn move_to_column(&mut self, column: usize) -> Result<(), W::Error> {
        use core::fmt::Write;
        let mut cmd = heapless::String::<16>::new();
        write!(&mut cmd, "\x1b[{}G", column).ok();
        self.write_str(&cmd).await
    }

    /// Replay an escape sequence verbatim, ESC byte first.
    pub async fn write_escape(&mut self, sequence: &[u8]) -> Result<(), W::Error> {
        self.writer.write_all(&[0x1B]).await?;
        self.write_bytes(sequence).await
    }

    /// Erase the character just left of the cursor. Only correct when the
    /// cursor is at the end of the line.
    pub async fn erase_last_char(&mut self) -> Result<(), W::Error> {
        self.write_str("\x08 \x08").await
    }

    /// Set the text color (basic ANSI colors 0-7).
    pub async fn set_color(&mut self, color: u8) -> Result<(), W::Error> {
        use core::fmt::Write;
        let mut cmd = heapless::String::<16>::new();
        write!(&mut cmd, "\x1b[3{}m", color).ok();
        self.write_str(&cmd).await
    }

    /// Reset text formatting.
    pub async fn reset_format(&mut self) -> Result<(), W::Error> {
        self.write_str("\x1b[0m").await
    }

    /// Write colorized text with a reset afterward.
    pub async fn write_colored(&mut self, text: &str, color: u8) -> Result<(), W::Error> {
        self.set_color(color).await?;
        self.write_str(text).await?;
        self.reset_format().await
    }

    /// Write a diagnostic message in red.
    pub async fn write_error(&mut self, msg: &str) -> Result<(), W::Error> {
        self.write_colored(msg, colors::RED).await
    }
}

/// ANSI color codes for convenience
pub mod colors {
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;
}
