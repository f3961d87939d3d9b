// Calendar grid
// A two-dimensional grid of date cells driven by a single focus position

use chrono::NaiveDate;

use crate::models::ui::Action;
use crate::utils::date::{month_label, week_span};

/// One week of the grid: seven date cells plus a label cell. The label
/// occupies column 0 and is never focusable; it carries the month
/// abbreviation only on rows containing the 1st of a month.
#[derive(Debug, Clone)]
pub struct WeekRow {
    pub label: Option<String>,
    pub days: [NaiveDate; 7],
}

/// Outcome of dispatching an action to the grid: the focus moved to a new
/// date (callers use this to refresh the event list), or the action was not
/// handled here and bubbles to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOutcome {
    Focused(NaiveDate),
    Bubbled(Action),
}

/// The date grid with its focus state. Focus columns are 1..=7; column 0 is
/// the label and can never hold focus.
pub struct CalendarGrid {
    rows: Vec<WeekRow>,
    focus_row: usize,
    focus_col: usize,
}

impl CalendarGrid {
    /// Builds a grid spanning `months` months starting at the month of
    /// `anchor`. Initial focus lands on `today` when the grid contains it,
    /// on row 0 otherwise; no focus notification is emitted for this
    /// initial placement.
    pub fn new(anchor: NaiveDate, today: NaiveDate, months: u32) -> Self {
        let rows: Vec<WeekRow> = week_span(anchor, months)
            .into_iter()
            .map(|days| WeekRow {
                label: month_label(&days),
                days,
            })
            .collect();

        let (focus_row, focus_col) = rows
            .iter()
            .enumerate()
            .find_map(|(row, week)| {
                week.days
                    .iter()
                    .position(|day| *day == today)
                    .map(|col| (row, col + 1))
            })
            .unwrap_or((0, 1));

        Self {
            rows,
            focus_row,
            focus_col,
        }
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    /// Current focus as (row, column), column in 1..=7.
    pub fn focus(&self) -> (usize, usize) {
        (self.focus_row, self.focus_col)
    }

    pub fn focused_date(&self) -> NaiveDate {
        self.rows[self.focus_row].days[self.focus_col - 1]
    }

    /// Single dispatch point for the grid.
    ///
    /// Vertical moves keep the column; horizontal moves wrap across row
    /// ends, so moving right from column 7 lands on column 1 of the next
    /// row and moving left from column 1 lands on column 7 of the previous
    /// one. Moves past the grid edge bubble unhandled. Tab and Enter leave
    /// the grid without moving focus.
    pub fn handle(&mut self, action: Action) -> GridOutcome {
        match action {
            Action::Up if self.focus_row > 0 => {
                self.focus_row -= 1;
                GridOutcome::Focused(self.focused_date())
            }
            Action::Down if self.focus_row + 1 < self.rows.len() => {
                self.focus_row += 1;
                GridOutcome::Focused(self.focused_date())
            }
            Action::Right if self.focus_col < 7 => {
                self.focus_col += 1;
                GridOutcome::Focused(self.focused_date())
            }
            Action::Right if self.focus_row + 1 < self.rows.len() => {
                self.focus_row += 1;
                self.focus_col = 1;
                GridOutcome::Focused(self.focused_date())
            }
            Action::Left if self.focus_col > 1 => {
                self.focus_col -= 1;
                GridOutcome::Focused(self.focused_date())
            }
            Action::Left if self.focus_row > 0 => {
                self.focus_row -= 1;
                self.focus_col = 7;
                GridOutcome::Focused(self.focused_date())
            }
            Action::Confirm | Action::NextPane => GridOutcome::Bubbled(Action::NextPane),
            other => GridOutcome::Bubbled(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid() -> CalendarGrid {
        // 2014-03-05 is a Wednesday in the second displayed week
        CalendarGrid::new(date(2014, 3, 5), date(2014, 3, 5), 3)
    }

    #[test]
    fn initial_focus_is_on_today() {
        let g = grid();
        assert_eq!(g.focused_date(), date(2014, 3, 5));
        let (row, col) = g.focus();
        assert_eq!(col, 3); // Wednesday
        assert_eq!(g.rows()[row].days[col - 1], date(2014, 3, 5));
    }

    #[test]
    fn initial_focus_falls_back_to_row_zero() {
        let g = CalendarGrid::new(date(2014, 3, 5), date(2020, 1, 1), 3);
        assert_eq!(g.focus(), (0, 1));
    }

    #[test]
    fn vertical_moves_keep_the_column() {
        let mut g = grid();
        let before = g.focus();
        assert_eq!(
            g.handle(Action::Down),
            GridOutcome::Focused(date(2014, 3, 12))
        );
        assert_eq!(g.focus(), (before.0 + 1, before.1));
        assert_eq!(g.handle(Action::Up), GridOutcome::Focused(date(2014, 3, 5)));
        assert_eq!(g.focus(), before);
    }

    #[test]
    fn right_wraps_to_the_next_row() {
        let mut g = grid();
        for _ in 0..4 {
            g.handle(Action::Right);
        }
        assert_eq!(g.focus().1, 7);
        assert_eq!(g.focused_date(), date(2014, 3, 9));

        assert_eq!(
            g.handle(Action::Right),
            GridOutcome::Focused(date(2014, 3, 10))
        );
        let (row, col) = g.focus();
        assert_eq!(col, 1);
        assert_eq!(g.rows()[row].days[0], date(2014, 3, 10));
    }

    #[test]
    fn left_wraps_to_the_previous_row() {
        let mut g = grid();
        g.handle(Action::Down);
        for _ in 0..2 {
            g.handle(Action::Left);
        }
        assert_eq!(g.focus().1, 1);

        assert_eq!(
            g.handle(Action::Left),
            GridOutcome::Focused(date(2014, 3, 9))
        );
        assert_eq!(g.focus().1, 7);
    }

    #[test]
    fn moves_past_the_edges_bubble_unhandled() {
        let mut g = grid();

        // walk to the very first cell
        while g.focus() != (0, 1) {
            if g.focus().1 > 1 {
                g.handle(Action::Left);
            } else {
                g.handle(Action::Up);
            }
        }
        assert_eq!(g.handle(Action::Up), GridOutcome::Bubbled(Action::Up));
        assert_eq!(g.handle(Action::Left), GridOutcome::Bubbled(Action::Left));

        // and to the very last one
        let last_row = g.rows().len() - 1;
        while g.focus() != (last_row, 7) {
            if g.focus().1 < 7 {
                g.handle(Action::Right);
            } else {
                g.handle(Action::Down);
            }
        }
        assert_eq!(g.handle(Action::Down), GridOutcome::Bubbled(Action::Down));
        assert_eq!(g.handle(Action::Right), GridOutcome::Bubbled(Action::Right));
    }

    #[test]
    fn tab_and_enter_leave_the_grid_without_moving_focus() {
        let mut g = grid();
        let before = g.focus();
        assert_eq!(
            g.handle(Action::NextPane),
            GridOutcome::Bubbled(Action::NextPane)
        );
        assert_eq!(
            g.handle(Action::Confirm),
            GridOutcome::Bubbled(Action::NextPane)
        );
        assert_eq!(g.focus(), before);
    }

    #[test]
    fn unrelated_actions_bubble_through() {
        let mut g = grid();
        assert_eq!(g.handle(Action::New), GridOutcome::Bubbled(Action::New));
        assert_eq!(
            g.handle(Action::Cancel),
            GridOutcome::Bubbled(Action::Cancel)
        );
    }
}
