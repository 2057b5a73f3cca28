//! JSONL reading operations.
//!
//! This module provides async, buffered, line-by-line reading of JSONL data
//! with line number tracking for error reporting, plus whole-file helpers in
//! strict ([`read_jsonl`]) and resilient ([`read_jsonl_resilient`]) flavors.

use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{Error, Result};
use crate::warning::Warning;

/// Async reader for JSONL (JSON Lines) data.
///
/// Wraps an async reader in a [`BufReader`] and tracks the 1-based number of
/// the last line read so parse failures can point at the offending line.
///
/// # Examples
///
/// ```no_run
/// use girder_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> girder_jsonl::Result<()> {
/// let file = File::open("data.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(value) = reader.read_record::<serde_json::Value>().await? {
///     println!("{value}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// 1-based number of the last line read; 0 before any reads.
    line_number: usize,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
        }
    }

    /// Returns the 1-based number of the last line read, or 0 before any
    /// lines have been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next raw line, stripped of its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input. Blank lines are returned as empty
    /// strings; callers decide how to treat them.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line).await?;
        if bytes == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Reads and deserializes the next record, silently skipping blank lines.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] naming the offending line when a
    /// non-blank line fails to parse, or an IO error from the underlying
    /// reader.
    pub async fn read_record<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        while let Some(line) = self.read_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record = serde_json::from_str(trimmed)
                .map_err(|e| Error::InvalidFormat(format!("line {}: {}", self.line_number, e)))?;
            return Ok(Some(record));
        }
        Ok(None)
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}

/// Reads all records from a JSONL file, failing on the first malformed line.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any non-blank line fails
/// to parse.
pub async fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path).await?;
    let mut reader = JsonlReader::new(file);
    let mut records = Vec::new();
    while let Some(record) = reader.read_record().await? {
        records.push(record);
    }
    Ok(records)
}

/// Reads all parseable records from a JSONL file, reporting problem lines as
/// warnings instead of failing.
///
/// Blank lines and malformed lines produce a [`Warning`] and are skipped;
/// only IO failures abort the read.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path).await?;
    let mut reader = JsonlReader::new(file);
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    while let Some(line) = reader.read_line().await? {
        let line_number = reader.line_number();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            tracing::debug!(line_number, "skipping blank JSONL line");
            warnings.push(Warning::SkippedLine {
                line_number,
                reason: "blank line".to_string(),
            });
            continue;
        }
        match serde_json::from_str(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::debug!(line_number, error = %e, "skipping malformed JSONL line");
                warnings.push(Warning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok((records, warnings))
}
