// Application state
// Routes input actions between the calendar grid, the event list and the
// event session, and keeps the list in sync with focus and mutations

use chrono::NaiveDate;

use crate::models::settings::Settings;
use crate::models::ui::{Action, Dispatch};
use crate::services::store::{EventStore, StoreError};
use crate::ui::event_list::EventList;
use crate::ui::grid::{CalendarGrid, GridOutcome};
use crate::ui::session::{EditSession, SessionEvent};

/// Which side of the screen receives navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Grid,
    Events,
}

/// The whole interactive state: one grid, one event list, at most one open
/// session, plus a status-line message for surfaced errors and notices.
///
/// Input handling is cooperative and single-threaded: one action is fully
/// processed, including any store calls it triggers, before the next one is
/// read.
pub struct CalendarApp<'a> {
    store: &'a dyn EventStore,
    settings: Settings,
    grid: CalendarGrid,
    list: EventList,
    session: EditSession,
    area: FocusArea,
    message: Option<String>,
}

impl<'a> CalendarApp<'a> {
    /// Build the grid around `today` and show today's events. The initial
    /// list render happens here directly, not through the focus observer.
    pub fn new(
        store: &'a dyn EventStore,
        settings: Settings,
        today: NaiveDate,
    ) -> Result<Self, StoreError> {
        let grid = CalendarGrid::new(today, today, settings.grid_months);
        let list = EventList::render(store, &settings, today)?;
        Ok(Self {
            store,
            settings,
            grid,
            list,
            session: EditSession::new(),
            area: FocusArea::Grid,
            message: None,
        })
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn list(&self) -> &EventList {
        &self.list
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn area(&self) -> FocusArea {
        self.area
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Status-line text from the last action, if it produced any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Translate a key through the configured bindings and dispatch it.
    /// Unbound keys are ignored.
    pub fn handle_key(&mut self, key: &str) {
        if let Some(action) = self.settings.keybindings.action_for(key) {
            self.handle_action(action);
        }
    }

    /// Top-level dispatcher. Exactly one component handles each action;
    /// bubbled actions are resolved here (pane switches) or dropped.
    pub fn handle_action(&mut self, action: Action) {
        self.message = None;

        if self.session.is_editing() {
            self.dispatch_editing(action);
            return;
        }

        match self.area {
            FocusArea::Grid => self.dispatch_grid(action),
            FocusArea::Events => self.dispatch_events(action),
        }
    }

    fn dispatch_editing(&mut self, action: Action) {
        match self.session.handle_editing(action, self.store) {
            Ok(SessionEvent::Saved) => self.refresh_list(),
            Ok(_) => {}
            Err(err) => self.report(format!("saving failed: {}", err)),
        }
    }

    fn dispatch_grid(&mut self, action: Action) {
        if action == Action::New {
            // create on the focused date and move over to the event pane
            let date = self.grid.focused_date();
            if self.session.new_event(date, &self.settings) {
                self.area = FocusArea::Events;
            } else {
                self.report("no account configured".to_string());
            }
            return;
        }

        match self.grid.handle(action) {
            GridOutcome::Focused(date) => self.show_date(date),
            GridOutcome::Bubbled(Action::NextPane) => self.area = FocusArea::Events,
            GridOutcome::Bubbled(_) => {}
        }
    }

    fn dispatch_events(&mut self, action: Action) {
        // a detail pane closes on any list navigation and does not block it
        if self.session.is_open() && matches!(action, Action::Up | Action::Down | Action::Left) {
            self.session.close();
        }

        match action {
            Action::Confirm => match self.session.viewed_event() {
                // second activation of the same row opens the editor
                Some(viewed) => {
                    let event = viewed.clone();
                    self.session.edit(event, &self.settings);
                }
                None => {
                    if let Some(row) = self.list.focused() {
                        self.session.view(row.event.clone(), &self.settings);
                    }
                }
            },
            Action::Edit => {
                if let Some(row) = self.list.focused() {
                    self.session.edit(row.event.clone(), &self.settings);
                }
            }
            Action::DeleteToggle => self.toggle_focused(),
            Action::New => {
                let date = self.list.date();
                if !self.session.new_event(date, &self.settings) {
                    self.report("no account configured".to_string());
                }
            }
            Action::Cancel => self.session.close(),
            Action::NextPane => {
                self.session.close();
                self.area = FocusArea::Grid;
            }
            other => {
                if let Dispatch::Bubbled(Action::Left) = self.list.handle(other) {
                    // leaving the list to the left returns to the grid
                    self.area = FocusArea::Grid;
                }
            }
        }
    }

    fn toggle_focused(&mut self) {
        let focus = self.list.focus();
        let Some(row) = self.list.focused_mut() else {
            return;
        };
        match row.toggle_delete(self.store) {
            Ok(Some(_)) => {
                self.refresh_list();
                self.list.set_focus(focus);
            }
            // refused read-only toggle: the marker sits on the row and
            // nothing was mutated, so the list is not re-rendered
            Ok(None) => {}
            Err(err) => self.report(format!("delete toggle failed: {}", err)),
        }
    }

    /// Focus observer: the grid landed on a new date, re-render the list.
    fn show_date(&mut self, date: NaiveDate) {
        if self.session.is_open() {
            self.session.close();
        }
        match EventList::render(self.store, &self.settings, date) {
            Ok(list) => self.list = list,
            Err(err) => self.report(format!("loading events failed: {}", err)),
        }
    }

    /// Re-render the current date after a mutation, keeping the row focus
    /// where possible. Always re-queried in full; no incremental diffing.
    fn refresh_list(&mut self) {
        let focus = self.list.focus();
        match EventList::render(self.store, &self.settings, self.list.date()) {
            Ok(mut list) => {
                list.set_focus(focus);
                self.list = list;
            }
            Err(err) => self.report(format!("loading events failed: {}", err)),
        }
    }

    fn report(&mut self, message: String) {
        log::warn!("{}", message);
        self.message = Some(message);
    }
}
