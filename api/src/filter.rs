use crate::datetime::utc_date;
use crate::{SportFilter, Tournament};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// The months the calendar can show. Tournaments starting outside it are
/// never visible, whatever the other filters say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub year: i32,
    pub first_month: u32,
    pub last_month: u32,
}

impl Default for MonthWindow {
    /// August through October 2025.
    fn default() -> Self {
        Self { year: 2025, first_month: 8, last_month: 10 }
    }
}

impl MonthWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && (self.first_month..=self.last_month).contains(&date.month())
    }

    pub fn clamp_month(&self, month: i64) -> u32 {
        month.clamp(i64::from(self.first_month), i64::from(self.last_month)) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub search_text: String,
    pub sport_filter: SportFilter,
    pub window: MonthWindow,
    pub selected_month: u32,
    pub selected_day: Option<u32>,
}

impl Default for FilterParams {
    fn default() -> Self {
        let window = MonthWindow::default();
        Self {
            search_text: String::new(),
            sport_filter: SportFilter::All,
            selected_month: window.first_month,
            window,
            selected_day: None,
        }
    }
}

/// Tournaments matching search text, sport, window and selected day, in the
/// order they were given.
///
/// Dates are compared on the UTC calendar (no display shift).
pub fn visible_tournaments<'a>(all: &'a [Tournament], params: &FilterParams) -> Vec<&'a Tournament> {
    let needle = params.search_text.to_lowercase();

    all.iter()
        .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
        .filter(|t| params.sport_filter.accepts(&t.sport_id))
        .filter(|t| {
            let Ok(start) = utc_date(&t.start_date) else {
                return false;
            };
            if !params.window.contains(start) {
                return false;
            }
            match params.selected_day {
                Some(day) => start.month() == params.selected_month && start.day() == day,
                None => true,
            }
        })
        .collect()
}

/// Days of `month` on which at least one in-window tournament starts.
///
/// Search and sport filters do not apply here: the grid marks every active
/// day of the season.
pub fn highlighted_days(all: &[Tournament], window: &MonthWindow, month: u32) -> BTreeSet<u32> {
    all.iter()
        .filter_map(|t| utc_date(&t.start_date).ok())
        .filter(|d| window.contains(*d) && d.month() == month)
        .map(|d| d.day())
        .collect()
}
