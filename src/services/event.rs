//! Event service

use chrono::NaiveDate;

use crate::error::{HoaError, HoaResult};
use crate::models::{validate_year, EventPatch, EventRecord, EventStatus, NewEvent};
use crate::storage::{keys, Partition, Storage};

use super::Facade;

/// Service for the event calendar of one year
pub struct EventService<'a> {
    storage: &'a Storage,
    year: String,
    partition: Partition<EventRecord>,
}

impl<'a> EventService<'a> {
    pub fn new(storage: &'a Storage, year: &str) -> HoaResult<Self> {
        validate_year(year)?;
        Ok(Self {
            storage,
            year: year.to_string(),
            partition: Partition::new(keys::events(year)),
        })
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// All events in the order they were scheduled
    pub fn list(&self) -> HoaResult<Vec<EventRecord>> {
        self.storage.records().get_all(&self.partition)
    }

    pub fn get(&self, id: &str) -> HoaResult<EventRecord> {
        self.list()?
            .into_iter()
            .find(|e| e.id == *id)
            .ok_or_else(|| HoaError::not_found("Event", id))
    }

    /// Schedule an event; it starts as pending unless a status is given
    pub fn create(&self, draft: NewEvent) -> HoaResult<EventRecord> {
        self.storage
            .records()
            .create(&self.partition, draft.into_record(&self.year))
    }

    pub fn update(&self, id: &str, patch: &EventPatch) -> HoaResult<EventRecord> {
        self.storage.records().update(&self.partition, id, patch)
    }

    pub fn delete(&self, id: &str) -> HoaResult<bool> {
        Ok(self.storage.records().delete(&self.partition, id)?.is_some())
    }

    /// Pending or confirmed events on or after `from`, soonest first
    pub fn upcoming(&self, from: NaiveDate) -> HoaResult<Vec<EventRecord>> {
        let mut events: Vec<EventRecord> = self
            .list()?
            .into_iter()
            .filter(|e| e.date >= from)
            .filter(|e| matches!(e.status, EventStatus::Pending | EventStatus::Confirmed))
            .collect();
        events.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(events)
    }
}

impl Facade for EventService<'_> {
    type Record = EventRecord;
    type Draft = NewEvent;
    type Patch = EventPatch;

    fn get_all(&self) -> HoaResult<Vec<EventRecord>> {
        self.list()
    }

    fn create(&self, draft: NewEvent) -> HoaResult<EventRecord> {
        EventService::create(self, draft)
    }

    fn update(&self, id: &str, patch: &EventPatch) -> HoaResult<EventRecord> {
        EventService::update(self, id, patch)
    }

    fn delete(&self, id: &str) -> HoaResult<bool> {
        EventService::delete(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn event(title: &str, month: u32, day: u32) -> NewEvent {
        NewEvent {
            title: title.into(),
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            place: "Casa Club".into(),
            kind: "asamblea".into(),
            attendee_count: 30,
            status: None,
            description: None,
        }
    }

    #[test]
    fn test_events_append_in_order() {
        let storage = Storage::in_memory();
        let service = EventService::new(&storage, "2024").unwrap();

        let first = service.create(event("Asamblea", 3, 1)).unwrap();
        service.create(event("Posada", 12, 15)).unwrap();

        assert_eq!(first.status, EventStatus::Pending);
        let all = service.list().unwrap();
        assert_eq!(all[0].title, "Asamblea");
        assert_eq!(all[1].title, "Posada");
    }

    #[test]
    fn test_upcoming_skips_past_and_cancelled() {
        let storage = Storage::in_memory();
        let service = EventService::new(&storage, "2024").unwrap();

        service.create(event("Posada", 12, 15)).unwrap();
        service.create(event("Asamblea", 3, 1)).unwrap();
        let cancelled = service.create(event("Kermés", 10, 5)).unwrap();
        service.create(event("Limpieza", 9, 20)).unwrap();

        let patch = EventPatch {
            status: Some(EventStatus::Cancelled),
            ..Default::default()
        };
        service.update(cancelled.id.as_str(), &patch).unwrap();

        let upcoming = service
            .upcoming(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Limpieza", "Posada"]);
    }
}
