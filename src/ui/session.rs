// Event session
// View → edit → save/cancel transitions for one event at a time

use chrono::NaiveDate;

use crate::models::event::{Event, EventStatus};
use crate::models::settings::Settings;
use crate::models::ui::Action;
use crate::services::store::{EventStore, StoreError};
use crate::ui::editor::StartEndEditor;

/// Content of the read-only detail pane.
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: Event,
    pub lines: Vec<String>,
}

impl EventDetail {
    fn new(event: Event, settings: &Settings) -> Self {
        let zone = settings.default_timezone;
        let mut lines = vec![event.data.summary.clone()];

        let (start_date, start_time) = event.data.start.civil(zone);
        let (end_date, end_time) = event.data.end.civil(zone);
        match (start_time, end_time) {
            (Some(start), Some(end)) => {
                let start_text = format!(
                    "{} {}",
                    start_date.format(&settings.dateformat),
                    start.format(&settings.timeformat)
                );
                let end_text = if start_date == end_date {
                    end.format(&settings.timeformat).to_string()
                } else {
                    format!(
                        "{} {}",
                        end_date.format(&settings.dateformat),
                        end.format(&settings.timeformat)
                    )
                };
                lines.push(format!("From: {} To: {}", start_text, end_text));
            }
            _ => {
                if start_date == end_date {
                    lines.push(format!("On: {}", start_date.format(&settings.dateformat)));
                } else {
                    lines.push(format!(
                        "From: {} to: {}",
                        start_date.format(&settings.dateformat),
                        end_date.format(&settings.dateformat)
                    ));
                }
            }
        }

        if !event.data.description.is_empty() {
            lines.push(format!("Desc: {}", event.data.description));
        }
        if !event.data.location.is_empty() {
            lines.push(format!("Loc: {}", event.data.location));
        }

        Self { event, lines }
    }
}

/// Focusable elements of the editor form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Summary,
    StartEnd,
    Recurrence,
    Description,
    Location,
    CancelButton,
    SaveButton,
}

const FORM: [EditorField; 7] = [
    EditorField::Summary,
    EditorField::StartEnd,
    EditorField::Recurrence,
    EditorField::Description,
    EditorField::Location,
    EditorField::CancelButton,
    EditorField::SaveButton,
];

const START_END_INDEX: usize = 1;

/// What a save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content was persisted.
    Saved,
    /// Nothing differed; no store call was made.
    Unchanged,
    /// An entry field is invalid; the form stays open on the offending
    /// sub-form.
    Blocked,
}

/// The editing form: free-text fields, the start/end editor and the
/// recurrence marker, seeded from one event.
pub struct EventEditor {
    event: Event,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub startend: StartEndEditor,
    /// Set once the user tried to activate the recurrence marker; editing
    /// repetition rules is refused visibly rather than silently dropped.
    pub recurrence_notice: bool,
    focus: usize,
}

impl EventEditor {
    fn new(event: Event, settings: &Settings) -> Self {
        let startend = StartEndEditor::new(event.data.start, event.data.end, settings);
        Self {
            summary: event.data.summary.clone(),
            description: event.data.description.clone(),
            location: event.data.location.clone(),
            startend,
            recurrence_notice: false,
            focus: 0,
            event,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn is_recurring(&self) -> bool {
        self.event.data.rrule.is_some()
    }

    pub fn focused_field(&self) -> EditorField {
        FORM[self.focus]
    }

    fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    fn focus_next(&mut self) {
        if self.focus + 1 < FORM.len() {
            self.focus += 1;
        }
    }

    /// True once any buffered value differs from the event. The start/end
    /// editor is always consulted first so its validity flags are fresh
    /// for the save gate even when a text field already differs.
    pub fn changed(&mut self) -> bool {
        let startend_changed = self.startend.changed();
        startend_changed
            || self.summary != self.event.data.summary
            || self.description != self.event.data.description
            || self.location != self.event.data.location
    }

    /// Try to persist the buffered edits.
    ///
    /// Any invalid entry field blocks the save: the form stays open, the
    /// sub-form gains focus, and a time field hidden behind the all-day
    /// switch is revealed by clearing that switch. A clean but unchanged
    /// buffer closes without a store call. Otherwise the revision counter
    /// is bumped (a missing counter starts at zero), the status becomes
    /// `Changed` unless the event was never uploaded (`New` stays `New`),
    /// and content plus status go to the store in one call. A store
    /// failure leaves the event untouched and the form open.
    pub fn save(&mut self, store: &dyn EventStore) -> Result<SaveOutcome, StoreError> {
        let changed = self.changed();

        if self.startend.any_invalid() {
            if self.startend.allday()
                && (!self.startend.start_time.is_valid() || !self.startend.end_time.is_valid())
            {
                self.startend.set_allday(false);
            }
            self.focus = START_END_INDEX;
            return Ok(SaveOutcome::Blocked);
        }

        if !changed {
            return Ok(SaveOutcome::Unchanged);
        }

        let mut data = self.event.data.clone();
        data.summary = self.summary.clone();
        data.description = self.description.clone();
        data.location = self.location.clone();
        if let Some(start) = self.startend.compute_start() {
            data.start = start;
        }
        if let Some(end) = self.startend.compute_end() {
            data.end = end;
        }
        data.sequence = Some(data.sequence.unwrap_or(0) + 1);

        let status = if self.event.status == EventStatus::New {
            EventStatus::New
        } else {
            EventStatus::Changed
        };

        store.update(
            &data.serialized()?,
            &self.event.account,
            &self.event.href,
            status,
        )?;

        self.event.data = data;
        self.event.status = status;
        log::info!("saved event {} with status {:?}", self.event.href, status);
        Ok(SaveOutcome::Saved)
    }
}

/// The single pane slot next to the grid. Its variant is the whole session
/// state; all transitions go through [`EditSession`].
pub enum Pane {
    None,
    Viewing(EventDetail),
    Editing(EventEditor),
}

/// What a dispatched action did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session is unchanged or consumed the action.
    Stay,
    /// The pane closed without persisting anything.
    Closed,
    /// A save was persisted and the pane closed.
    Saved,
}

/// Holder of the pane state. Editing is modal: while an editor is open
/// every action is routed here and nothing leaks to the surrounding panes.
pub struct EditSession {
    pane: Pane,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self { pane: Pane::None }
    }

    pub fn pane(&self) -> &Pane {
        &self.pane
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.pane, Pane::None)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.pane, Pane::Editing(_))
    }

    /// Event shown by the detail pane, if one is open.
    pub fn viewed_event(&self) -> Option<&Event> {
        match &self.pane {
            Pane::Viewing(detail) => Some(&detail.event),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EventEditor> {
        match &mut self.pane {
            Pane::Editing(editor) => Some(editor),
            _ => None,
        }
    }

    /// Show an event's read-only details, replacing whatever detail pane
    /// was open before.
    pub fn view(&mut self, event: Event, settings: &Settings) {
        self.pane = Pane::Viewing(EventDetail::new(event, settings));
    }

    /// Open the editor form for an event.
    pub fn edit(&mut self, event: Event, settings: &Settings) {
        self.pane = Pane::Editing(EventEditor::new(event, settings));
    }

    /// Create a fresh draft on `date` in the default account and edit it
    /// right away. Returns false when no account is configured.
    pub fn new_event(&mut self, date: NaiveDate, settings: &Settings) -> bool {
        let Some(account) = settings.default_account() else {
            log::warn!("cannot create an event: no account configured");
            return false;
        };
        let draft = Event::draft_on(date, &account.name);
        self.edit(draft, settings);
        true
    }

    /// Drop whatever pane is open.
    pub fn close(&mut self) {
        self.pane = Pane::None;
    }

    /// Explicit cancel: always discards buffered edits and closes.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Attempt a save; the pane closes unless an invalid field blocks it.
    pub fn save(&mut self, store: &dyn EventStore) -> Result<SessionEvent, StoreError> {
        let Pane::Editing(editor) = &mut self.pane else {
            return Ok(SessionEvent::Stay);
        };
        match editor.save(store)? {
            SaveOutcome::Blocked => Ok(SessionEvent::Stay),
            SaveOutcome::Unchanged => {
                self.pane = Pane::None;
                Ok(SessionEvent::Closed)
            }
            SaveOutcome::Saved => {
                self.pane = Pane::None;
                Ok(SessionEvent::Saved)
            }
        }
    }

    /// Modal dispatch while the editor is open.
    ///
    /// Up/Down move the form focus; Enter activates the focused element
    /// (all-day switch, recurrence marker, Cancel, Save). Escape closes
    /// only a clean and valid form; with unsaved or invalid entries the
    /// keypress is swallowed so changes are never discarded implicitly.
    /// Everything else is swallowed too.
    pub fn handle_editing(
        &mut self,
        action: Action,
        store: &dyn EventStore,
    ) -> Result<SessionEvent, StoreError> {
        let Pane::Editing(editor) = &mut self.pane else {
            return Ok(SessionEvent::Stay);
        };
        match action {
            Action::Up => {
                editor.focus_prev();
                Ok(SessionEvent::Stay)
            }
            Action::Down => {
                editor.focus_next();
                Ok(SessionEvent::Stay)
            }
            Action::Confirm => match editor.focused_field() {
                EditorField::CancelButton => {
                    self.cancel();
                    Ok(SessionEvent::Closed)
                }
                EditorField::SaveButton => self.save(store),
                EditorField::StartEnd => {
                    let allday = editor.startend.allday();
                    editor.startend.set_allday(!allday);
                    Ok(SessionEvent::Stay)
                }
                EditorField::Recurrence => {
                    editor.recurrence_notice = true;
                    Ok(SessionEvent::Stay)
                }
                _ => Ok(SessionEvent::Stay),
            },
            Action::Cancel => {
                if !editor.changed() && !editor.startend.any_invalid() {
                    self.close();
                    Ok(SessionEvent::Closed)
                } else {
                    Ok(SessionEvent::Stay)
                }
            }
            _ => Ok(SessionEvent::Stay),
        }
    }
}
