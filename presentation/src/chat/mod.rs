//! Interactive chat module
//!
//! Provides a line-editor based chat interface over the indexed document.

mod repl;

pub use repl::ChatRepl;
