//! Event store boundary.
//! The interface components run against these four operations; the SQLite
//! implementation lives in [`sqlite`].

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::models::event::{Event, EventStatus};

pub mod sqlite;

pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no event {href} in account {account}")]
    NotFound { href: String, account: String },
    #[error("unknown status code {0}")]
    UnknownStatus(i64),
    #[error("malformed event content: {0}")]
    Content(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Synchronous store of calendar events.
///
/// Calls block the caller; a failed call must leave the store unmodified so
/// the interface can keep its in-memory state at the pre-call value.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    /// All-day events whose date range includes `date`, in store order.
    fn query_allday(&self, date: NaiveDate, account: &str) -> Result<Vec<Event>, StoreError>;

    /// Timed events overlapping the half-open range `[start, end)`, in
    /// store order.
    fn query_timed(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        account: &str,
    ) -> Result<Vec<Event>, StoreError>;

    /// Persist a status transition for the event keyed by (href, account).
    fn set_status(&self, href: &str, account: &str, status: EventStatus)
        -> Result<(), StoreError>;

    /// Persist edited content and status together. Unknown hrefs are
    /// inserted, which is how locally created events reach the store.
    fn update(
        &self,
        content: &str,
        account: &str,
        href: &str,
        status: EventStatus,
    ) -> Result<(), StoreError>;
}
