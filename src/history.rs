// Upload history: a small JSON file in the user's home directory listing
// past uploads, so the CLI can show a "video library" without asking the
// backend. Best effort; a missing or corrupt file reads as empty.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One recorded upload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryEntry {
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(file_name: impl Into<String>, file_url: impl Into<String>) -> Self {
        HistoryEntry {
            file_name: file_name.into(),
            file_url: file_url.into(),
            uploaded_at: Utc::now(),
        }
    }
}

fn history_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(".qavision_history.json")
}

/// Load all recorded uploads, newest last. Unreadable or unparseable
/// files are treated as an empty history.
pub fn load_history() -> Vec<HistoryEntry> {
    load_from(&history_path())
}

/// Append one entry and rewrite the file.
pub fn append_history(entry: HistoryEntry) -> Result<()> {
    append_to(&history_path(), entry)
}

fn load_from(path: &PathBuf) -> Vec<HistoryEntry> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&data) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("ignoring corrupt history file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn append_to(path: &PathBuf, entry: HistoryEntry) -> Result<()> {
    let mut entries = load_from(path);
    entries.push(entry);
    std::fs::write(path, serde_json::to_string_pretty(&entries)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        append_to(&path, HistoryEntry::new("a.mp4", "https://x/a.mp4")).unwrap();
        append_to(&path, HistoryEntry::new("b.mov", "https://x/b.mov")).unwrap();

        let entries = load_from(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "a.mp4");
        assert_eq!(entries[1].file_url, "https://x/b.mov");
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_from(&path).is_empty());
    }
}
