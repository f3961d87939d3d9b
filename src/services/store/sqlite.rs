// SQLite event store
// One row per event; payload kept as serialized content, plus indexed
// start/end columns derived from it for range queries

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use super::{EventStore, StoreError};
use crate::models::event::{Event, EventData, EventStatus, EventTime};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the store at `path` (":memory:" for in-memory)
    /// and enables foreign keys immediately.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self { conn })
    }

    /// Creates the events table if it does not exist.
    pub fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                href TEXT NOT NULL,
                account TEXT NOT NULL,
                status INTEGER NOT NULL DEFAULT 0,
                content TEXT NOT NULL,
                allday INTEGER NOT NULL,
                start_utc TEXT NOT NULL,
                end_utc TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                UNIQUE(href, account)
            )",
            [],
        )?;
        Ok(())
    }

    /// Read/write access to the underlying connection, for tooling that
    /// needs to go beyond the [`EventStore`] operations.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Fetch a single event; mainly useful for tests and sync tooling.
    pub fn get(&self, href: &str, account: &str) -> Result<Option<Event>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT href, account, status, content FROM events
             WHERE href = ?1 AND account = ?2",
        )?;
        let mut rows = stmt.query(params![href, account])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_event(row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_event(row: &rusqlite::Row<'_>) -> Result<Event, StoreError> {
    let status_code: i64 = row.get(2)?;
    let content: String = row.get(3)?;
    let data: EventData = serde_json::from_str(&content)?;
    Ok(Event {
        href: row.get(0)?,
        account: row.get(1)?,
        status: EventStatus::from_db(status_code).ok_or(StoreError::UnknownStatus(status_code))?,
        readonly: false,
        color: None,
        data,
    })
}

/// Civil date used for the all-day range index; timed endpoints index on
/// their UTC date, which those queries never consult.
fn index_date(time: &EventTime) -> NaiveDate {
    match time {
        EventTime::AllDay(date) => *date,
        EventTime::At(zi) => zi.instant.date_naive(),
    }
}

impl EventStore for SqliteStore {
    fn query_allday(&self, date: NaiveDate, account: &str) -> Result<Vec<Event>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT href, account, status, content FROM events
             WHERE account = ?1 AND allday = 1
               AND start_date <= ?2 AND end_date >= ?2
             ORDER BY id",
        )?;
        let mut rows = stmt.query(params![account, date.to_string()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(row_to_event(row)?);
        }
        Ok(events)
    }

    fn query_timed(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        account: &str,
    ) -> Result<Vec<Event>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT href, account, status, content FROM events
             WHERE account = ?1 AND allday = 0
               AND start_utc < ?3 AND end_utc > ?2
             ORDER BY id",
        )?;
        let mut rows = stmt.query(params![account, start.to_rfc3339(), end.to_rfc3339()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(row_to_event(row)?);
        }
        Ok(events)
    }

    fn set_status(
        &self,
        href: &str,
        account: &str,
        status: EventStatus,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE events SET status = ?3 WHERE href = ?1 AND account = ?2",
            params![href, account, status.as_db()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                href: href.to_string(),
                account: account.to_string(),
            });
        }
        log::debug!("status of {}/{} set to {:?}", account, href, status);
        Ok(())
    }

    fn update(
        &self,
        content: &str,
        account: &str,
        href: &str,
        status: EventStatus,
    ) -> Result<(), StoreError> {
        let data: EventData = serde_json::from_str(content)?;
        self.conn.execute(
            "INSERT INTO events
                (href, account, status, content, allday,
                 start_utc, end_utc, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(href, account) DO UPDATE SET
                status = excluded.status,
                content = excluded.content,
                allday = excluded.allday,
                start_utc = excluded.start_utc,
                end_utc = excluded.end_utc,
                start_date = excluded.start_date,
                end_date = excluded.end_date",
            params![
                href,
                account,
                status.as_db(),
                content,
                data.start.is_all_day() as i64,
                data.start.sort_key().to_rfc3339(),
                data.end.sort_key().to_rfc3339(),
                index_date(&data.start).to_string(),
                index_date(&data.end).to_string(),
            ],
        )?;
        log::debug!("updated {}/{} with status {:?}", account, href, status);
        Ok(())
    }
}
