//! An async JSONL (JSON Lines) library.
//!
//! This library provides buffered reading and writing of JSONL formatted
//! data, resilient loading that reports bad lines as warnings instead of
//! failing, crash-safe atomic file writes, and a streaming adapter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod stream;
pub mod warning;
pub mod writer;

pub use atomic::{write_jsonl_atomic, write_jsonl_atomic_iter};
pub use error::{Error, Result};
pub use reader::{JsonlReader, read_jsonl, read_jsonl_resilient};
pub use stream::{record_stream, resilient_record_stream};
pub use warning::{Warning, WarningCollector};
pub use writer::JsonlWriter;
