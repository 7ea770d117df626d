//! Record list encoding and file persistence.
//!
//! Reading is fail-soft: a missing file, empty content, content that is not a
//! bracketed array, or anything that does not parse yields an empty list.
//! Writing is fail-loud: every I/O error reaches the caller.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ChatError, Result};
use crate::persist::format::Record;

/// Parse a record list. Never fails; malformed input is treated as no data.
pub fn decode(text: &str) -> Vec<Record> {
    decode_as(text)
}

/// [`decode`] into any record shape, such as
/// [`ReplayRecord`](crate::persist::format::ReplayRecord).
pub fn decode_as<T: DeserializeOwned>(text: &str) -> Vec<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        debug!("Content is not a bracketed record list");
        return Vec::new();
    }
    match serde_json::from_str::<Vec<T>>(trimmed) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Discarding malformed record list");
            Vec::new()
        }
    }
}

/// Pretty-print a record list with 2-space indentation and a trailing newline.
pub fn encode(records: &[Record]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    Ok(out)
}

/// Read and decode the records stored at `path`.
pub fn read_records(path: &Path) -> Vec<Record> {
    read_as(path)
}

/// [`read_records`] into any record shape.
pub fn read_as<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        debug!(path = %path.display(), "No record file yet");
        return Vec::new();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => decode_as(&contents),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read record file");
            Vec::new()
        }
    }
}

/// Replace the contents of `path` with the encoded records.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let contents = encode(records)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ChatError::io(parent, e))?;
        }
    }
    let mut file = File::create(path).map_err(|e| ChatError::io(path, e))?;
    file.write_all(contents.as_bytes()).map_err(|e| ChatError::io(path, e))?;
    file.flush().map_err(|e| ChatError::io(path, e))?;
    info!(path = %path.display(), count = records.len(), "Records written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::format::ReplayRecord;

    fn record(id: &str, text: &str) -> Record {
        Record {
            message_id: id.to_string(),
            sender: "Developer".to_string(),
            message_hash: format!("{id}:0:X"),
            recipient: "+27831234567".to_string(),
            message: text.to_string(),
        }
    }

    #[test]
    fn test_decode_empty_and_garbage() {
        assert!(decode("").is_empty());
        assert!(decode("   \n").is_empty());
        assert!(decode("{ \"MessageID\": \"1\" }").is_empty());
        assert!(decode("[ { \"MessageID\": ").is_empty());
        assert!(decode("[ { \"MessageID\": 5 } ]").is_empty());
        assert!(decode("[]").is_empty());
    }

    #[test]
    fn test_encode_layout() {
        let text = encode(&[record("A1", "Hello")]).expect("encode");
        let expected = "[\n  {\n    \"MessageID\": \"A1\",\n    \"Sender\": \"Developer\",\n    \"MessageHash\": \"A1:0:X\",\n    \"Recipient\": \"+27831234567\",\n    \"Message\": \"Hello\"\n  }\n]\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_escaped_values_survive() {
        let records = vec![
            record("A1", "line one\nline two\r\n"),
            record("B2", "she said \"hi\", then left"),
            record("C3", "back\\slash, {braces}, [brackets]"),
        ];
        let text = encode(&records).expect("encode");
        assert_eq!(decode(&text), records);
    }

    #[test]
    fn test_decode_legacy_layout() {
        let legacy = r#"
        [
          { "MessageID":"A1", "Sender":"S", "Recipient":"+2783", "Message":"Hello" },
          { "MessageID":"B2", "Sender":"S", "MessageHash":"B2:1:BYE", "Recipient":"+2783", "Message":"Bye" }
        ]
        "#;
        let records = decode(legacy);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message_hash, "");
        assert_eq!(records[1].message, "Bye");
    }

    #[test]
    fn test_decode_replay_keeps_missing_apart_from_empty() {
        let text = r#"[
          { "MessageID":"A1", "Sender":"", "Recipient":"+2783", "Message":"Hello" },
          { "Recipient":"+2783", "Message":"Bye" }
        ]"#;
        let records: Vec<ReplayRecord> = decode_as(text);
        assert_eq!(records[0].message_id.as_deref(), Some("A1"));
        assert_eq!(records[0].sender.as_deref(), Some(""));
        assert_eq!(records[1].message_id, None);
        assert_eq!(records[1].sender, None);
        assert_eq!(records[1].message, "Bye");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(read_records(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("messages.json");
        write_records(&path, &[record("A1", "a"), record("B2", "b")]).expect("write");
        write_records(&path, &[record("C3", "c")]).expect("write");
        let back = read_records(&path);
        assert_eq!(back, vec![record("C3", "c")]);
    }

    #[test]
    fn test_write_into_missing_dir_creates_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("drafts.json");
        write_records(&path, &[record("A1", "a")]).expect("write");
        assert_eq!(read_records(&path).len(), 1);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory cannot be opened as a file.
        let err = write_records(dir.path(), &[record("A1", "a")]).unwrap_err();
        assert!(matches!(err, ChatError::Io { .. }));
    }
}
