//! Community events (assemblies, maintenance days, celebrations)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ensure_present, EntityKind, Record, RecordId};
use crate::error::HoaResult;

/// Lifecycle state of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Finished,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Pending => write!(f, "pending"),
            EventStatus::Confirmed => write!(f, "confirmed"),
            EventStatus::Cancelled => write!(f, "cancelled"),
            EventStatus::Finished => write!(f, "finished"),
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(EventStatus::Pending),
            "confirmed" => Ok(EventStatus::Confirmed),
            "cancelled" | "canceled" => Ok(EventStatus::Cancelled),
            "finished" => Ok(EventStatus::Finished),
            other => Err(format!("unknown event status '{}'", other)),
        }
    }
}

/// A scheduled event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: RecordId,
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub place: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attendee_count: u32,
    #[serde(default)]
    pub status: EventStatus,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record for EventRecord {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Event title", &self.title)
    }
}

/// Input for a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub place: String,
    pub kind: String,
    pub attendee_count: u32,
    pub status: Option<EventStatus>,
    pub description: Option<String>,
}

impl NewEvent {
    pub(crate) fn into_record(self, year: &str) -> EventRecord {
        EventRecord {
            id: RecordId::unassigned(),
            title: self.title,
            date: self.date,
            time: self.time,
            place: self.place,
            kind: self.kind,
            attendee_count: self.attendee_count,
            status: self.status.unwrap_or_default(),
            year: year.to_string(),
            description: self.description,
        }
    }
}

/// Partial update of an event
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    /// `Some(None)` clears the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&EventStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let parsed: EventStatus = serde_json::from_str("\"finished\"").unwrap();
        assert_eq!(parsed, EventStatus::Finished);
    }

    #[test]
    fn test_new_event_defaults_to_pending() {
        let event = NewEvent {
            title: "Asamblea General".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            place: "Casa Club".into(),
            kind: "asamblea".into(),
            attendee_count: 40,
            status: None,
            description: None,
        }
        .into_record("2024");
        assert_eq!(event.status, EventStatus::Pending);
        assert!(event.validate().is_ok());
    }
}
