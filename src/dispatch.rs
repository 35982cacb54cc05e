use embedded_io_async::Write as AsyncWrite;
use heapless::String;

use crate::writer::{colors, TerminalWriter};

/// A committed line, queued between the intake pass that produced it and
/// the drain pass that runs it. Carries only the text and the action
/// kind, nothing borrowed from the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<const CAP: usize> {
    /// Run the line through the script engine.
    Run(String<CAP>),
    /// Write the NUL-terminated line to flash and reboot.
    Store(String<CAP>),
}

/// How the engine reported a failed evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalError {
    /// The source did not parse.
    Parse,
    /// The source parsed but execution failed.
    Runtime,
}

/// A successfully evaluated value, carried as its printable
/// representation. The variant decides how the result line is wrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue<const OUT: usize> {
    /// Textual value; rendered wrapped in quotes.
    Text(String<OUT>),
    /// Sequence value; rendered wrapped in brackets.
    Sequence(String<OUT>),
    /// Anything else; rendered verbatim.
    Other(String<OUT>),
}

/// Script execution collaborator. Evaluation may take unbounded time,
/// which is why it only ever runs from the drained queue, never inside
/// the byte-intake path.
pub trait ScriptEngine<const OUT: usize> {
    fn eval(&mut self, source: &str) -> Result<ScriptValue<OUT>, EvalError>;
}

/// Durable storage collaborator.
///
/// Production implementations write the buffer to flash and reset the
/// MCU; `reset` returning is what lets host-side test doubles observe
/// the call, on hardware it does not come back.
pub trait FlashStore {
    type Error;
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
    fn reset(&mut self);
}

/// Run one queued command against the collaborators and render its
/// outcome. Ends back on a fresh prompt, except for a successful store
/// which ends in a device reset.
pub async fn execute<W, E, F, const CAP: usize>(
    command: Command<CAP>,
    engine: &mut E,
    flash: &mut F,
    writer: &mut TerminalWriter<'_, W>,
    prompt: &str,
) -> Result<(), W::Error>
where
    W: AsyncWrite,
    E: ScriptEngine<CAP>,
    F: FlashStore,
{
    match command {
        Command::Run(line) => {
            match engine.eval(&line) {
                Ok(value) => {
                    writer.clear_line().await?;
                    writer.set_color(colors::CYAN).await?;
                    match &value {
                        ScriptValue::Text(text) => {
                            writer.write_str("\"").await?;
                            writer.write_str(text).await?;
                            writer.write_str("\"").await?;
                        }
                        ScriptValue::Sequence(items) => {
                            writer.write_str("[").await?;
                            writer.write_str(items).await?;
                            writer.write_str("]").await?;
                        }
                        ScriptValue::Other(text) => {
                            writer.write_str(text).await?;
                        }
                    }
                    writer.reset_format().await?;
                    writer.write_str("\r\n").await?;
                }
                Err(EvalError::Parse) => {
                    writer.write_error("Syntax error while parsing code...").await?;
                    writer.write_str("\r\n").await?;
                }
                Err(EvalError::Runtime) => {
                    writer.write_error("Running failed...").await?;
                    writer.write_str("\r\n").await?;
                }
            }
            writer.write_prompt(prompt).await
        }
        Command::Store(line) => {
            if flash.write(line.as_bytes()).is_err() {
                writer.write_error("Flash write failed...").await?;
                writer.write_str("\r\n").await?;
                return writer.write_prompt(prompt).await;
            }
            writer.write_str("Rebooting...\r\n").await?;
            flash.reset();
            Ok(())
        }
    }
}
