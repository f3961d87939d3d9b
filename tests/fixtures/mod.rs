// Test fixtures - reusable test data
// Provides consistent sample events, settings and stores for the
// integration tests

use chrono::{NaiveDate, TimeZone, Utc};
use termcal::models::event::{Event, EventData, EventStatus, EventTime, ZonedInstant};
use termcal::models::settings::{Account, Settings};
use termcal::services::store::{EventStore, SqliteStore};

/// Route library log output into the test harness when RUST_LOG is set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The date most fixtures live on: Wednesday, 2014-03-05.
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 3, 5).unwrap()
}

/// Two accounts: a writable "home" and a read-only "work" feed.
pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.default_timezone = chrono_tz::Europe::Berlin;
    settings.accounts = vec![
        Account {
            name: "home".to_string(),
            color: Some("dark green".to_string()),
            readonly: false,
        },
        Account {
            name: "work".to_string(),
            color: Some("dark blue".to_string()),
            readonly: true,
        },
    ];
    settings
}

/// A timed event on the base date, hours given in Berlin wall time.
pub fn timed_event(href: &str, account: &str, start_hour: u32, end_hour: u32) -> Event {
    let zone = chrono_tz::Europe::Berlin;
    let at = |hour: u32| {
        EventTime::At(ZonedInstant::new(
            // Berlin is UTC+1 on the base date
            Utc.with_ymd_and_hms(2014, 3, 5, hour - 1, 0, 0).unwrap(),
            Some(zone),
        ))
    };
    Event {
        href: href.to_string(),
        account: account.to_string(),
        status: EventStatus::Ok,
        readonly: false,
        color: None,
        data: EventData {
            summary: href.trim_end_matches(".ics").to_string(),
            description: String::new(),
            location: String::new(),
            start: at(start_hour),
            end: at(end_hour),
            rrule: None,
            sequence: None,
        },
    }
}

/// An all-day event covering a single date.
pub fn allday_event(href: &str, account: &str, date: NaiveDate) -> Event {
    let mut event = timed_event(href, account, 9, 10);
    event.data.start = EventTime::AllDay(date);
    event.data.end = EventTime::AllDay(date);
    event
}

/// Persist an event into the store under its current status.
pub fn insert(store: &SqliteStore, event: &Event) {
    store
        .update(
            &event.data.serialized().unwrap(),
            &event.account,
            &event.href,
            event.status,
        )
        .unwrap();
}

/// An in-memory store with the schema initialized.
pub fn empty_store() -> SqliteStore {
    let store = SqliteStore::new(":memory:").unwrap();
    store.initialize_schema().unwrap();
    store
}
