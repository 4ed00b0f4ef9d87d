//! Record identifiers
//!
//! Records are identified by opaque strings that only need to be unique
//! inside their partition. New ids are derived from the wall clock in
//! milliseconds, the same granularity a person clicking "save" works at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Placeholder for a record the store has not assigned an id to yet
    pub(crate) fn unassigned() -> Self {
        Self(String::new())
    }

    /// Generate a timestamp-based id that `taken` does not report as used
    ///
    /// On collision the candidate is bumped by one millisecond until free.
    pub fn generate<F>(prefix: &str, taken: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut stamp = chrono::Utc::now().timestamp_millis();
        loop {
            let candidate = format!("{}{}", prefix, stamp);
            if !taken(&candidate) {
                return Self(candidate);
            }
            stamp += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_numeric_timestamp() {
        let id = RecordId::generate("", |_| false);
        assert!(!id.is_empty());
        assert!(id.as_str().parse::<i64>().is_ok());
    }

    #[test]
    fn test_generate_skips_taken_ids() {
        let first = RecordId::generate("custom-", |_| false);
        let second = RecordId::generate("custom-", |candidate| candidate <= first.as_str());
        assert_ne!(first, second);
        assert!(second.as_str().starts_with("custom-"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RecordId::from("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        assert_eq!(id, "42");
    }
}
