//! JSONL audit log writer and reader

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{PesoError, PesoResult};

use super::entry::AuditEntry;

/// Appends audit entries to `audit.log`, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> PesoResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PesoError::Io(format!("Failed to open audit log: {}", e)))
    }

    /// Append one entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> PesoResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> PesoResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_for_append()?;
        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                PesoError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;
            writeln!(file, "{}", json)
                .map_err(|e| PesoError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| PesoError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> PesoResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| PesoError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                PesoError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                PesoError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> PesoResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn entry_count(&self) -> PesoResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn wallet_entry(i: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Wallet,
            format!("wal-{}", i),
            Some(format!("Wallet {}", i)),
            &json!({"index": i}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&wallet_entry(0)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Wallet);
    }

    #[test]
    fn test_batch_and_recent() {
        let (logger, _temp) = create_test_logger();
        let batch: Vec<_> = (0..10).map(wallet_entry).collect();
        logger.log_batch(&batch).unwrap();

        assert_eq!(logger.entry_count().unwrap(), 10);
        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["wal-7", "wal-8", "wal-9"]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.path().exists());
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_entries_survive_new_logger() {
        let (logger, temp) = create_test_logger();
        logger.log(&wallet_entry(1)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let (logger, _temp) = create_test_logger();
        logger.log(&wallet_entry(1)).unwrap();
        std::fs::write(logger.path(), "not json\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
