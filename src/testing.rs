//! Shared test doubles for the async collaborators.

use core::convert::Infallible;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use heapless::{String, Vec};

use crate::dispatch::{EvalError, FlashStore, ScriptEngine, ScriptValue};

/// Input stream double feeding scripted bytes, then a zero-length read.
/// Optionally raises a redraw signal once the script is exhausted,
/// before reporting end of input.
pub(crate) struct ScriptedReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    raise_at_end: Option<&'a Signal<NoopRawMutex, ()>>,
}

impl<'a> ScriptedReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            raise_at_end: None,
        }
    }

    pub fn raising(bytes: &'a [u8], signal: &'a Signal<NoopRawMutex, ()>) -> Self {
        Self {
            bytes,
            pos: 0,
            raise_at_end: Some(signal),
        }
    }
}

impl embedded_io_async::ErrorType for ScriptedReader<'_> {
    type Error = Infallible;
}

impl embedded_io_async::Read for ScriptedReader<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.pos < self.bytes.len() {
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            return Ok(1);
        }
        if let Some(signal) = self.raise_at_end.take() {
            signal.signal(());
            // Let the session observe the signal before end of input.
            embassy_futures::yield_now().await;
        }
        Ok(0)
    }
}

/// Output stream double capturing everything the writer emits.
pub(crate) struct RecordingWriter {
    pub out: Vec<u8, 1024>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.out).unwrap()
    }
}

impl embedded_io_async::ErrorType for RecordingWriter {
    type Error = Infallible;
}

impl embedded_io_async::Write for RecordingWriter {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.out.extend_from_slice(buf).unwrap();
        Ok(buf.len())
    }
}

/// Engine double replying with a fixed outcome and recording sources.
pub(crate) struct StubEngine<const OUT: usize> {
    pub reply: Result<ScriptValue<OUT>, EvalError>,
    pub sources: Vec<String<64>, 4>,
}

impl<const OUT: usize> StubEngine<OUT> {
    pub fn replying(reply: Result<ScriptValue<OUT>, EvalError>) -> Self {
        Self {
            reply,
            sources: Vec::new(),
        }
    }
}

impl<const OUT: usize> ScriptEngine<OUT> for StubEngine<OUT> {
    fn eval(&mut self, source: &str) -> Result<ScriptValue<OUT>, EvalError> {
        self.sources
            .push(String::try_from(source).unwrap())
            .unwrap();
        self.reply.clone()
    }
}

/// Flash double recording writes and reset requests.
pub(crate) struct StubFlash {
    pub written: Vec<u8, 256>,
    pub resets: usize,
}

impl StubFlash {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
            resets: 0,
        }
    }
}

impl FlashStore for StubFlash {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.written.extend_from_slice(data)
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}
