// Event time endpoints
// All-day events carry bare calendar dates, timed events absolute instants

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// An absolute instant plus the timezone it was specified in.
///
/// `zone` is `None` for floating times imported without timezone
/// information; such instants are interpreted in the configured default
/// timezone when displayed or edited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZonedInstant {
    pub instant: DateTime<Utc>,
    pub zone: Option<Tz>,
}

impl ZonedInstant {
    pub fn new(instant: DateTime<Utc>, zone: Option<Tz>) -> Self {
        Self { instant, zone }
    }
}

// Equality is the absolute instant; the zone is display metadata and must
// not make two representations of the same point in time unequal.
impl PartialEq for ZonedInstant {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for ZonedInstant {}

/// One temporal endpoint of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    AllDay(NaiveDate),
    At(ZonedInstant),
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::AllDay(_))
    }

    /// The timezone this endpoint was specified in, if any.
    pub fn zone(&self) -> Option<Tz> {
        match self {
            EventTime::AllDay(_) => None,
            EventTime::At(zi) => zi.zone,
        }
    }

    /// Civil date and (for timed endpoints) time of day, rendered in the
    /// endpoint's own zone or `fallback_zone` for floating/all-day values.
    pub fn civil(&self, fallback_zone: Tz) -> (NaiveDate, Option<NaiveTime>) {
        match self {
            EventTime::AllDay(date) => (*date, None),
            EventTime::At(zi) => {
                let local = zi.instant.with_timezone(&zi.zone.unwrap_or(fallback_zone));
                (local.date_naive(), Some(local.time()))
            }
        }
    }

    /// Key for ordering timed events by start; all-day endpoints sort at the
    /// UTC midnight of their date.
    pub fn sort_key(&self) -> DateTime<Utc> {
        match self {
            EventTime::AllDay(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            EventTime::At(zi) => zi.instant,
        }
    }
}
