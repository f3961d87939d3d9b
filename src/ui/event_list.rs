// Event list
// Assembles and orders the event rows for the selected date

use chrono::NaiveDate;

use crate::models::event::{Event, EventStatus};
use crate::models::settings::{Account, Settings};
use crate::models::ui::{Action, Dispatch};
use crate::services::store::{EventStore, StoreError};
use crate::utils::date::day_bounds;

/// One selectable line of the event list.
#[derive(Debug, Clone)]
pub struct EventRow {
    pub event: Event,
    readonly_marker: bool,
}

impl EventRow {
    fn new(event: Event) -> Self {
        Self {
            event,
            readonly_marker: false,
        }
    }

    /// Display label: the compact event text, prefixed with "RO" once a
    /// delete toggle was refused because the event is read-only.
    pub fn label(&self, settings: &Settings) -> String {
        let text = self.event.compact_label(settings);
        if self.readonly_marker {
            format!("RO{}", text)
        } else {
            text
        }
    }

    /// Flip the delete mark on this row.
    ///
    /// Read-only events are not toggled; the row gains a visible marker
    /// instead and `Ok(None)` is returned. For writable events the store is
    /// updated first and the in-memory status only changes once that call
    /// succeeded, so a store failure leaves the row at its pre-call state.
    pub fn toggle_delete(&mut self, store: &dyn EventStore) -> Result<Option<EventStatus>, StoreError> {
        if self.event.readonly {
            self.readonly_marker = true;
            log::info!("refusing delete toggle on read-only event {}", self.event.href);
            return Ok(None);
        }
        let next = self.event.status.toggled_delete();
        store.set_status(&self.event.href, &self.event.account, next)?;
        self.event.status = next;
        Ok(Some(next))
    }
}

/// The rows shown for one date, with a focus over them.
pub struct EventList {
    date: NaiveDate,
    rows: Vec<EventRow>,
    focus: usize,
}

impl EventList {
    /// Query the store and assemble the rows for `date`: every account's
    /// all-day events first, in store order, then all timed events sorted
    /// ascending by start instant. The sort is stable, so timed events
    /// starting at the same instant keep their store order.
    pub fn render(
        store: &dyn EventStore,
        settings: &Settings,
        date: NaiveDate,
    ) -> Result<Self, StoreError> {
        let mut allday = Vec::new();
        let mut timed = Vec::new();

        for account in &settings.accounts {
            for mut event in store.query_allday(date, &account.name)? {
                tag(&mut event, account);
                allday.push(event);
            }
            let (start, end) = day_bounds(date, settings.default_timezone);
            for mut event in store.query_timed(start, end, &account.name)? {
                tag(&mut event, account);
                timed.push(event);
            }
        }

        timed.sort_by_key(|event| event.data.start.sort_key());

        let rows = allday
            .into_iter()
            .chain(timed)
            .map(EventRow::new)
            .collect();

        Ok(Self {
            date,
            rows,
            focus: 0,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Header line above the rows: the date in the long format.
    pub fn header(&self, settings: &Settings) -> String {
        self.date.format(&settings.longdateformat).to_string()
    }

    pub fn rows(&self) -> &[EventRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Restore a focus position after a re-render, clamped to the new rows.
    pub fn set_focus(&mut self, focus: usize) {
        self.focus = focus.min(self.rows.len().saturating_sub(1));
    }

    pub fn focused(&self) -> Option<&EventRow> {
        self.rows.get(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut EventRow> {
        self.rows.get_mut(self.focus)
    }

    /// Row navigation; moves past either end bubble unhandled.
    pub fn handle(&mut self, action: Action) -> Dispatch {
        match action {
            Action::Up if self.focus > 0 => {
                self.focus -= 1;
                Dispatch::Handled
            }
            Action::Down if self.focus + 1 < self.rows.len() => {
                self.focus += 1;
                Dispatch::Handled
            }
            other => Dispatch::Bubbled(other),
        }
    }
}

fn tag(event: &mut Event, account: &Account) {
    event.color = account.color.clone();
    event.readonly = account.readonly;
}
