// Start/end field editor
// Text entry for event start and end, with per-field validation and
// timezone-aware recombination into absolute instants

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::models::event::{EventTime, ZonedInstant};
use crate::models::settings::Settings;
use crate::utils::date::local_instant;

/// Parse outcome of a single entry field. Invalid input never produces a
/// partial value; the field simply holds no usable result until re-edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T> {
    Valid(T),
    Invalid,
}

impl<T> Parsed<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Parsed::Valid(value) => Some(value),
            Parsed::Invalid => None,
        }
    }
}

/// One text entry plus the validity flag left by its most recent parse.
#[derive(Debug, Clone)]
pub struct FieldBuffer {
    text: String,
    valid: bool,
}

impl FieldBuffer {
    fn new(text: String) -> Self {
        Self { text, valid: true }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// False once the last parse of this field failed; renderers highlight
    /// the field while this is set.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// The edit buffer for an event's temporal extent: four independent text
/// fields plus the all-day switch, seeded from the event's current values.
///
/// Timezones cannot be edited here; a recombined instant reuses the zone the
/// original endpoint carried and falls back to the configured default for
/// floating or all-day originals.
pub struct StartEndEditor {
    original_start: EventTime,
    original_end: EventTime,
    pub start_date: FieldBuffer,
    pub start_time: FieldBuffer,
    pub end_date: FieldBuffer,
    pub end_time: FieldBuffer,
    allday: bool,
    longdateformat: String,
    timeformat: String,
    default_zone: Tz,
}

impl StartEndEditor {
    pub fn new(start: EventTime, end: EventTime, settings: &Settings) -> Self {
        let zone = settings.default_timezone;
        let (start_date, start_time) = start.civil(zone);
        let (end_date, end_time) = end.civil(zone);

        let fmt_date = |d: NaiveDate| d.format(&settings.longdateformat).to_string();
        let fmt_time = |t: Option<NaiveTime>| {
            t.unwrap_or(NaiveTime::MIN)
                .format(&settings.timeformat)
                .to_string()
        };

        Self {
            allday: start.is_all_day(),
            original_start: start,
            original_end: end,
            start_date: FieldBuffer::new(fmt_date(start_date)),
            start_time: FieldBuffer::new(fmt_time(start_time)),
            end_date: FieldBuffer::new(fmt_date(end_date)),
            end_time: FieldBuffer::new(fmt_time(end_time)),
            longdateformat: settings.longdateformat.clone(),
            timeformat: settings.timeformat.clone(),
            default_zone: zone,
        }
    }

    pub fn allday(&self) -> bool {
        self.allday
    }

    /// Switch between timed and all-day entry. The date texts are left
    /// untouched; the time fields merely stop being consulted (the
    /// rendering layer swaps them for an empty placeholder).
    pub fn set_allday(&mut self, allday: bool) {
        self.allday = allday;
    }

    pub fn parse_date(&self, text: &str) -> Parsed<NaiveDate> {
        parse_date_with(text, &self.longdateformat)
    }

    pub fn parse_time(&self, text: &str) -> Parsed<NaiveTime> {
        parse_time_with(text, &self.timeformat)
    }

    /// True while any field's last parse failed. Fields hidden by the
    /// all-day switch keep their flag until re-parsed.
    pub fn any_invalid(&self) -> bool {
        !(self.start_date.valid
            && self.start_time.valid
            && self.end_date.valid
            && self.end_time.valid)
    }

    /// Recombine the start entry into an event time.
    ///
    /// Returns `None` when a required field does not parse or the entered
    /// wall time does not exist in the target zone; callers treat that as
    /// "no computed change" and rely on the validity flags for gating.
    pub fn compute_start(&mut self) -> Option<EventTime> {
        let date = refresh(&mut self.start_date, |t| {
            parse_date_with(t, &self.longdateformat)
        });
        if self.allday {
            return date.ok().map(EventTime::AllDay);
        }
        let time = refresh(&mut self.start_time, |t| {
            parse_time_with(t, &self.timeformat)
        });
        self.combine(date, time, self.original_start.zone())
    }

    /// Recombine the end entry; same algorithm as [`Self::compute_start`]
    /// with the end fields and the original end zone.
    pub fn compute_end(&mut self) -> Option<EventTime> {
        let date = refresh(&mut self.end_date, |t| {
            parse_date_with(t, &self.longdateformat)
        });
        if self.allday {
            return date.ok().map(EventTime::AllDay);
        }
        let time = refresh(&mut self.end_time, |t| {
            parse_time_with(t, &self.timeformat)
        });
        self.combine(date, time, self.original_end.zone())
    }

    fn combine(
        &self,
        date: Parsed<NaiveDate>,
        time: Parsed<NaiveTime>,
        original_zone: Option<Tz>,
    ) -> Option<EventTime> {
        let (Parsed::Valid(date), Parsed::Valid(time)) = (date, time) else {
            return None;
        };
        let zone = original_zone.unwrap_or(self.default_zone);
        let instant = local_instant(NaiveDateTime::new(date, time), zone)?;
        Some(EventTime::At(ZonedInstant::new(instant, Some(zone))))
    }

    /// True iff a computed endpoint is defined and differs from its
    /// original instant. Undefined computations count as no difference;
    /// both endpoints are always computed so every validity flag is fresh
    /// afterwards.
    pub fn changed(&mut self) -> bool {
        let start = self.compute_start();
        let end = self.compute_end();
        start.is_some_and(|s| s != self.original_start)
            || end.is_some_and(|e| e != self.original_end)
    }
}

fn parse_date_with(text: &str, format: &str) -> Parsed<NaiveDate> {
    match NaiveDate::parse_from_str(text, format) {
        Ok(date) => Parsed::Valid(date),
        Err(_) => Parsed::Invalid,
    }
}

fn parse_time_with(text: &str, format: &str) -> Parsed<NaiveTime> {
    match NaiveTime::parse_from_str(text, format) {
        Ok(time) => Parsed::Valid(time),
        Err(_) => Parsed::Invalid,
    }
}

fn refresh<T>(field: &mut FieldBuffer, parse: impl Fn(&str) -> Parsed<T>) -> Parsed<T> {
    let parsed = parse(&field.text);
    field.valid = matches!(parsed, Parsed::Valid(_));
    parsed
}
