use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// DomainEventType defines type of event for domain changes
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    Added,
    Updated,
    Deleted,
}

// DomainEvent abstracts a circulation change (checkout, return, hold,
// renewal) for publication. The occurred_on date is the civil date of
// the operation itself, so replays of the same requests produce the
// same events.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub key: String,
    pub kind: DomainEventType,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub occurred_on: NaiveDate,
}

impl DomainEvent {
    pub fn added<T: Serialize>(name: &str, key: &str, occurred_on: NaiveDate, data: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(Self::build(name, key, DomainEventType::Added, occurred_on, json))
    }

    pub fn updated<T: Serialize>(name: &str, key: &str, occurred_on: NaiveDate, data: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(Self::build(name, key, DomainEventType::Updated, occurred_on, json))
    }

    pub fn deleted<T: Serialize>(name: &str, key: &str, occurred_on: NaiveDate, data: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(Self::build(name, key, DomainEventType::Deleted, occurred_on, json))
    }

    fn build(name: &str, key: &str, kind: DomainEventType, occurred_on: NaiveDate, json: String) -> DomainEvent {
        DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            key: key.to_string(),
            kind,
            json_data: json,
            occurred_on,
        }
    }
}
