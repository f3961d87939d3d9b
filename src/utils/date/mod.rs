// Date utility functions
// Civil/absolute conversions and the week framing used by the calendar grid

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a civil datetime in `zone` to an absolute instant.
///
/// Ambiguous wall times (clocks rolled back) resolve to the earlier offset;
/// nonexistent wall times (clocks skipped forward) resolve to `None`.
pub fn local_instant(naive: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// First absolute instant of `date` in `zone`.
///
/// When midnight does not exist on that day the first existing hour is used
/// instead, so the result is always defined.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    local_instant(midnight, zone)
        .or_else(|| local_instant(midnight + Duration::hours(1), zone))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Half-open absolute range covering `date` in `zone`.
pub fn day_bounds(date: NaiveDate, zone: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (start_of_day(date, zone), start_of_day(date + Duration::days(1), zone))
}

/// Monday-started weeks covering `months` consecutive months, beginning with
/// the month containing `anchor`. The week shared by two consecutive months
/// appears only once.
pub fn week_span(anchor: NaiveDate, months: u32) -> Vec<[NaiveDate; 7]> {
    let mut weeks: Vec<[NaiveDate; 7]> = Vec::new();
    let mut year = anchor.year();
    let mut month = anchor.month();

    for _ in 0..months {
        // month stays in 1..=12, so the 1st always exists
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let mut monday = first - Duration::days(first.weekday().num_days_from_monday() as i64);

        while monday.year() < year || (monday.year() == year && monday.month() <= month) {
            let week: [NaiveDate; 7] = std::array::from_fn(|i| monday + Duration::days(i as i64));
            if weeks.last() != Some(&week) {
                weeks.push(week);
            }
            monday += Duration::days(7);
        }

        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    weeks
}

/// Month label for a week row: the three-letter abbreviation of the month the
/// week's last day falls in, present only on rows containing a 1st.
pub fn month_label(week: &[NaiveDate; 7]) -> Option<String> {
    if week.iter().any(|day| day.day() == 1) {
        Some(week[6].format("%b").to_string())
    } else {
        None
    }
}
