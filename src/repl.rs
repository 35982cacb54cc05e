use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::signal::Signal;
use embedded_io_async::{Read, Write as AsyncWrite};

use crate::dispatch::{self, Command, FlashStore, ScriptEngine};
use crate::editor::{EditorConfig, LineEditor};
use crate::writer::TerminalWriter;

/// Commands waiting between the intake pass that produced them and the
/// drain pass that runs them. One line is in flight at a time by
/// construction (the buffer is cleared before a command is queued), so
/// the queue stays shallow.
const QUEUE_DEPTH: usize = 2;

/// An interactive session: line editor, deferred command queue, and an
/// optional redraw hook for out-of-band console output.
///
/// `CAP` bounds the line length, `DEPTH` the history size. The mutex
/// flavor `M` is the caller's choice, matching wherever the session runs
/// (e.g. `NoopRawMutex` on a single-threaded executor).
pub struct Repl<'a, M, const CAP: usize, const DEPTH: usize>
where
    M: RawMutex,
{
    editor: LineEditor<CAP, DEPTH>,
    queue: Channel<M, Command<CAP>, QUEUE_DEPTH>,
    redraw: Option<&'a Signal<M, ()>>,
}

impl<'a, M, const CAP: usize, const DEPTH: usize> Repl<'a, M, CAP, DEPTH>
where
    M: RawMutex,
{
    /// Create a session. When `redraw` is given, signaling it makes the
    /// session rewrite the prompt and the partial line; collaborators
    /// printing to the shared output use this instead of reaching into
    /// the session.
    pub fn new(config: EditorConfig, redraw: Option<&'a Signal<M, ()>>) -> Self {
        Self {
            editor: LineEditor::new(config),
            queue: Channel::new(),
            redraw,
        }
    }

    /// Drive the session until the input stream ends.
    ///
    /// The loop multiplexes three sources, in priority order: the next
    /// queued command, the redraw signal, and the next input byte.
    /// Pending commands are drained before another byte is taken, so
    /// every committed line reaches the collaborators exactly once and
    /// in submission order, while still running only after the
    /// classification pass that produced it has returned. Bytes are
    /// handled strictly in arrival order and never block. A zero-length
    /// read ends the session, read errors are retried, and write errors
    /// propagate. A successful persist command resets the device and
    /// does not come back here.
    pub async fn run<R, W, E, F>(
        &mut self,
        reader: &mut R,
        writer: &mut TerminalWriter<'_, W>,
        engine: &mut E,
        flash: &mut F,
    ) -> Result<(), W::Error>
    where
        R: Read,
        W: AsyncWrite,
        E: ScriptEngine<CAP>,
        F: FlashStore,
    {
        writer.write_prompt(self.editor.prompt()).await?;

        let mut byte = [0u8; 1];
        loop {
            let event = select3(
                self.queue.receive(),
                wait_for_redraw(self.redraw),
                reader.read(&mut byte),
            )
            .await;

            match event {
                Either3::First(command) => {
                    dispatch::execute(command, engine, flash, writer, self.editor.prompt())
                        .await?;
                }
                Either3::Second(()) => {
                    if let Some(signal) = self.redraw {
                        signal.reset();
                    }
                    self.editor.redraw(writer).await?;
                }
                Either3::Third(Ok(0)) => return Ok(()),
                Either3::Third(Ok(_)) => {
                    if let Some(command) = self.editor.handle_byte(byte[0], writer).await? {
                        if let Err(TrySendError::Full(command)) = self.queue.try_send(command) {
                            // Queue full: run the oldest pending line
                            // first so submission order holds, then queue
                            // this one in the freed slot. No committed
                            // line is ever dropped.
                            let pending = self.queue.receive().await;
                            dispatch::execute(pending, engine, flash, writer, self.editor.prompt())
                                .await?;
                            self.queue.send(command).await;
                        }
                    }
                }
                Either3::Third(Err(_)) => continue,
            }
        }
    }
}

async fn wait_for_redraw<M: RawMutex>(signal: Option<&Signal<M, ()>>) {
    match signal {
        Some(signal) => signal.wait().await,
        None => core::future::pending::<()>().await,
    }
}
