#![no_std]
#![doc = include_str!("../README.md")]

//! A serial REPL front end for `no_std` embedded systems.
//!
//! This crate provides line editing, escape-sequence classification,
//! command history, and deferred dispatch of submitted lines to a script
//! engine or flash storage, over async byte-stream I/O.

pub mod buffer;
pub mod classifier;
pub mod dispatch;
pub mod editor;
pub mod history;
pub mod repl;
pub mod writer;

pub use buffer::EditBuffer;
pub use classifier::{EscapeClassifier, Key};
pub use dispatch::{Command, EvalError, FlashStore, ScriptEngine, ScriptValue};
pub use editor::{EditorConfig, LineEditor};
pub use history::{History, Recall};
pub use repl::Repl;
pub use writer::TerminalWriter;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::dispatch::{Command, EvalError, FlashStore, ScriptEngine, ScriptValue};
    pub use crate::editor::{EditorConfig, LineEditor};
    pub use crate::repl::Repl;
    pub use crate::writer::TerminalWriter;
}

#[cfg(test)]
pub(crate) mod testing;
