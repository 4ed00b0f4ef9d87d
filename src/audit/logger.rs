//! Append-only audit journal
//!
//! One JSON object per line. A line that cannot be parsed, such as a
//! write cut short by a crash, is skipped with a warning so the rest of
//! the journal stays readable.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{HoaError, HoaResult};

use super::entry::{AuditEntry, Operation};

/// Which journal entries a query returns; unset fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Storage key, e.g. `houses` or `income_2024`
    pub key: Option<String>,
    pub record_id: Option<String>,
    pub operation: Option<Operation>,
}

impl AuditFilter {
    /// Every change to one record
    pub fn record(key: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            record_id: Some(record_id.into()),
            operation: None,
        }
    }

    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.key.as_deref().map_or(true, |k| entry.key == k)
            && self.record_id.as_deref().map_or(true, |id| entry.record_id == id)
            && self.operation.map_or(true, |op| entry.operation == op)
    }
}

/// The journal file behind the record store
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append `entry` as one line
    ///
    /// The line goes out in a single write so concurrent appenders never
    /// interleave inside an entry. A torn last line is closed first.
    pub fn log(&self, entry: &AuditEntry) -> HoaResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| HoaError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| HoaError::Io(format!("Failed to open audit log: {}", e)))?;

        let line = if ends_mid_line(&mut file)? {
            format!("\n{}\n", json)
        } else {
            format!("{}\n", json)
        };

        file.write_all(line.as_bytes())
            .map_err(|e| HoaError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every readable entry, oldest first
    pub fn read_all(&self) -> HoaResult<Vec<AuditEntry>> {
        self.query(&AuditFilter::default(), None)
    }

    /// The `count` most recent entries, oldest first
    pub fn read_recent(&self, count: usize) -> HoaResult<Vec<AuditEntry>> {
        self.query(&AuditFilter::default(), Some(count))
    }

    /// Entries matching `filter`, oldest first, keeping only the last
    /// `limit` when one is given
    pub fn query(&self, filter: &AuditFilter, limit: Option<usize>) -> HoaResult<Vec<AuditEntry>> {
        let Some(reader) = self.open_reader()? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                HoaError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) if filter.matches(&entry) => entries.push(entry),
                Ok(_) => {}
                Err(e) => warn!(line = index + 1, error = %e, "Skipping unreadable audit entry"),
            }
        }

        if let Some(limit) = limit {
            let start = entries.len().saturating_sub(limit);
            entries.drain(..start);
        }
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn open_reader(&self) -> HoaResult<Option<BufReader<File>>> {
        match File::open(&self.log_path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HoaError::Io(format!("Failed to open audit log: {}", e))),
        }
    }
}

/// Whether the file's last byte is something other than a newline
fn ends_mid_line(file: &mut File) -> HoaResult<bool> {
    let io_err = |e: std::io::Error| HoaError::Io(format!("Failed to inspect audit log: {}", e));

    let len = file.metadata().map_err(io_err)?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1)).map_err(io_err)?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).map_err(io_err)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn log_mixed(logger: &AuditLogger) {
        for i in 0..4 {
            let entry = AuditEntry::create(
                EntityKind::Income,
                "income_2024",
                i.to_string(),
                &json!({"index": i}),
            );
            logger.log(&entry).unwrap();
        }
        let house = json!({"number": "45"});
        logger
            .log(&AuditEntry::update(
                EntityKind::House,
                "houses",
                "45",
                &house,
                &json!({"number": "45", "owner": "Lucía"}),
                Some("owner: added".into()),
            ))
            .unwrap();
        logger
            .log(&AuditEntry::delete(EntityKind::House, "houses", "45", &house))
            .unwrap();
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = AuditEntry::create(
            EntityKind::House,
            "houses",
            "46",
            &json!({"number": "46", "name": "Casa 46"}),
        );

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity, EntityKind::House);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        log_mixed(&logger);

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].record_id, "3");
        assert_eq!(recent[2].operation, Operation::Delete);
    }

    #[test]
    fn test_query_by_record() {
        let (logger, _temp) = create_test_logger();
        log_mixed(&logger);

        let history = logger.query(&AuditFilter::record("houses", "45"), None).unwrap();
        let operations: Vec<Operation> = history.iter().map(|e| e.operation).collect();
        assert_eq!(operations, vec![Operation::Update, Operation::Delete]);
    }

    #[test]
    fn test_query_by_key_operation_and_limit() {
        let (logger, _temp) = create_test_logger();
        log_mixed(&logger);

        let filter = AuditFilter {
            key: Some("income_2024".into()),
            operation: Some(Operation::Create),
            ..Default::default()
        };
        let entries = logger.query(&filter, Some(2)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].record_id, "2");
        assert_eq!(entries[1].record_id, "3");

        let deletes = AuditFilter {
            operation: Some(Operation::Delete),
            ..Default::default()
        };
        assert_eq!(logger.query(&deletes, None).unwrap().len(), 1);
    }

    #[test]
    fn test_torn_line_is_skipped() {
        let (logger, temp) = create_test_logger();
        log_mixed(&logger);

        let path = temp.path().join("audit.log");
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("{\"timestamp\":\"2024-01-0");
        fs::write(&path, contents).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 6);

        logger
            .log(&AuditEntry::delete(EntityKind::Fine, "fines", "3", &json!({})))
            .unwrap();
        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[6].key, "fines");
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        let entry = AuditEntry::delete(EntityKind::Fine, "fines", "3", &json!({}));
        logger.log(&entry).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Delete);
    }
}
