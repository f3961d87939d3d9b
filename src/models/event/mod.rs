// Event module
// Calendar event model: editable payload plus store bookkeeping

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::settings::Settings;

pub mod status;
pub mod time;

pub use status::EventStatus;
pub use time::{EventTime, ZonedInstant};

static DRAFT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Editable payload of an event. This is the value that gets serialized and
/// handed to the store's `update` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start: EventTime,
    pub end: EventTime,
    /// Raw recurrence rule. Presence-only: editing recurrence is refused,
    /// the rule is carried through saves untouched.
    #[serde(default)]
    pub rrule: Option<String>,
    /// Revision counter, bumped on every content-changing save.
    #[serde(default)]
    pub sequence: Option<u32>,
}

impl EventData {
    pub fn serialized(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A calendar event row as handled by the interface: the payload plus the
/// identity, status and per-account display attributes the store tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub href: String,
    pub account: String,
    pub status: EventStatus,
    pub readonly: bool,
    pub color: Option<String>,
    pub data: EventData,
}

impl Event {
    /// A fresh locally-created draft: an all-day event on `date`, status
    /// `New`, with a generated href that is unique within this process.
    pub fn draft_on(date: NaiveDate, account: &str) -> Self {
        let serial = DRAFT_COUNTER.fetch_add(1, Ordering::Relaxed);
        let href = format!("{}-{}.ics", Utc::now().timestamp_micros(), serial);
        Self {
            href,
            account: account.to_string(),
            status: EventStatus::New,
            readonly: false,
            color: None,
            data: EventData {
                summary: String::new(),
                description: String::new(),
                location: String::new(),
                start: EventTime::AllDay(date),
                end: EventTime::AllDay(date),
                rrule: None,
                sequence: None,
            },
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.data.start.is_all_day()
    }

    pub fn is_recurring(&self) -> bool {
        self.data.rrule.is_some()
    }

    /// One-line label for the event list: "HH:MM-HH:MM: summary" for timed
    /// events, the bare summary for all-day events.
    pub fn compact_label(&self, settings: &Settings) -> String {
        let zone = settings.default_timezone;
        match (
            self.data.start.civil(zone).1,
            self.data.end.civil(zone).1,
        ) {
            (Some(start), Some(end)) => format!(
                "{}-{}: {}",
                start.format(&settings.timeformat),
                end.format(&settings.timeformat),
                self.data.summary
            ),
            _ => self.data.summary.clone(),
        }
    }
}
