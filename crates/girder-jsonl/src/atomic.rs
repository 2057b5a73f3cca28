//! Atomic write operations for JSONL files.
//!
//! On POSIX systems a rename within one filesystem is atomic. The writers
//! here exploit that for crash safety:
//!
//! 1. Data is written to a temporary file with a `.tmp` extension
//! 2. The temporary file is flushed and closed
//! 3. The temporary file is renamed over the target path
//!
//! If a crash occurs during step 1 or 2, the original file remains intact.

use crate::{JsonlWriter, Result};
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;

/// Atomically writes a slice of values to a JSONL file.
///
/// The target file is never left partially written: either the rename
/// happens and the file holds every record, or the original content stays.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, a value fails
/// to serialize, an IO error occurs while writing, or the rename fails. On
/// failure the original file is left unchanged and the temporary file is
/// removed on a best-effort basis.
///
/// # Examples
///
/// ```no_run
/// use girder_jsonl::write_jsonl_atomic;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Record {
///     id: u32,
/// }
///
/// # async fn example() -> girder_jsonl::Result<()> {
/// let records = vec![Record { id: 1 }, Record { id: 2 }];
/// write_jsonl_atomic("data.jsonl", &records).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_jsonl_atomic_iter(path, values.iter()).await
}

/// Atomically writes an iterator of values to a JSONL file.
///
/// A more flexible version of [`write_jsonl_atomic`] for callers that want
/// to avoid collecting values into a slice first.
///
/// # Errors
///
/// See [`write_jsonl_atomic`].
pub async fn write_jsonl_atomic_iter<T, I, P>(path: P, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    let write_result = write_to_temp_file(&temp_path, values).await;
    if let Err(e) = write_result {
        // Best-effort cleanup of the temp file.
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Appends `.tmp` to the path's extension, or uses `tmp` when there is none.
fn make_temp_path(path: &Path) -> std::path::PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file<T, I>(temp_path: &Path, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let file = File::create(temp_path).await?;
    let mut writer = JsonlWriter::new(file);
    writer.write_all(values).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: u32,
        name: String,
    }

    fn sample_records() -> Vec<TestRecord> {
        vec![
            TestRecord {
                id: 1,
                name: "First".to_string(),
            },
            TestRecord {
                id: 2,
                name: "Second".to_string(),
            },
        ]
    }

    #[test]
    fn make_temp_path_with_extension() {
        let path = Path::new("/path/to/file.jsonl");
        assert_eq!(make_temp_path(path), Path::new("/path/to/file.jsonl.tmp"));
    }

    #[test]
    fn make_temp_path_without_extension() {
        let path = Path::new("/path/to/file");
        assert_eq!(make_temp_path(path), Path::new("/path/to/file.tmp"));
    }

    #[test]
    fn make_temp_path_with_multiple_extensions() {
        let path = Path::new("/path/to/file.tar.gz");
        assert_eq!(make_temp_path(path), Path::new("/path/to/file.tar.gz.tmp"));
    }

    #[tokio::test]
    async fn atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("records.jsonl");

        write_jsonl_atomic(&target, &sample_records()).await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"id":1,"name":"First"}"#);
        assert_eq!(lines[1], r#"{"id":2,"name":"Second"}"#);
    }

    #[tokio::test]
    async fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("records.jsonl");
        tokio::fs::write(&target, "old content\n").await.unwrap();

        let records = vec![TestRecord {
            id: 42,
            name: "New".to_string(),
        }];
        write_jsonl_atomic(&target, &records).await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        assert_eq!(contents.trim(), r#"{"id":42,"name":"New"}"#);
    }

    #[tokio::test]
    async fn atomic_write_leaves_no_temp_file_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("records.jsonl");
        let temp = dir.path().join("records.jsonl.tmp");

        write_jsonl_atomic(&target, &sample_records()).await.unwrap();

        assert!(target.exists());
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn atomic_write_empty_slice_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("records.jsonl");

        let records: Vec<TestRecord> = vec![];
        write_jsonl_atomic(&target, &records).await.unwrap();

        let metadata = tokio::fs::metadata(&target).await.unwrap();
        assert_eq!(metadata.len(), 0);
    }

    #[tokio::test]
    async fn atomic_write_iter_accepts_generator() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("records.jsonl");

        let records = (0..5).map(|id| TestRecord {
            id,
            name: format!("Record_{id}"),
        });
        write_jsonl_atomic_iter(&target, records).await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains(r#""id":0"#));
        assert!(lines[4].contains(r#""id":4"#));
    }

    #[tokio::test]
    async fn failed_write_keeps_original_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing-dir").join("records.jsonl");

        // Parent directory does not exist, so creating the temp file fails.
        let result = write_jsonl_atomic(&target, &sample_records()).await;
        assert!(result.is_err());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn atomic_write_preserves_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("records.jsonl");

        let records = vec![TestRecord {
            id: 1,
            name: "Hello \u{4e16}\u{754c}".to_string(),
        }];
        write_jsonl_atomic(&target, &records).await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        assert!(contents.contains("\u{4e16}\u{754c}"));
    }
}
