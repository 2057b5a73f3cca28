//! Streaming operations for JSONL data.
//!
//! This module adapts a [`JsonlReader`] into a [`futures::Stream`] of decoded
//! records, so large files can be processed without holding every record in
//! memory at once.

use futures::Stream;
use futures::stream;
use serde::de::DeserializeOwned;
use tokio::io::AsyncRead;

use crate::error::Result;
use crate::reader::JsonlReader;
use crate::warning::{Warning, WarningCollector};

/// Returns a stream of decoded records from the given reader.
///
/// Blank lines are skipped. The stream yields `Err` for the first malformed
/// line or IO failure and ends after it.
///
/// # Examples
///
/// ```no_run
/// use futures::StreamExt;
/// use girder_jsonl::{JsonlReader, record_stream};
/// use tokio::fs::File;
///
/// # async fn example() -> girder_jsonl::Result<()> {
/// let file = File::open("data.jsonl").await?;
/// let stream = record_stream::<_, serde_json::Value>(JsonlReader::new(file));
/// let records: Vec<_> = stream.collect().await;
/// # Ok(())
/// # }
/// ```
pub fn record_stream<R, T>(reader: JsonlReader<R>) -> impl Stream<Item = Result<T>>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    stream::try_unfold(reader, |mut reader| async move {
        match reader.read_record::<T>().await? {
            Some(record) => Ok(Some((record, reader))),
            None => Ok(None),
        }
    })
}

/// Returns a stream of decoded records that reports bad lines to `collector`
/// instead of failing.
///
/// Blank and malformed lines produce a [`Warning`] and are skipped; only IO
/// failures surface as stream errors.
pub fn resilient_record_stream<R, T>(
    reader: JsonlReader<R>,
    collector: WarningCollector,
) -> impl Stream<Item = Result<T>>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    stream::try_unfold((reader, collector), |(mut reader, collector)| async move {
        loop {
            let Some(line) = reader.read_line().await? else {
                return Ok(None);
            };
            let line_number = reader.line_number();
            let trimmed = line.trim();
            if trimmed.is_empty() {
                collector.add(Warning::SkippedLine {
                    line_number,
                    reason: "blank line".to_string(),
                });
                continue;
            }
            match serde_json::from_str::<T>(trimmed) {
                Ok(record) => return Ok(Some((record, (reader, collector)))),
                Err(e) => collector.add(Warning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                }),
            }
        }
    })
}
