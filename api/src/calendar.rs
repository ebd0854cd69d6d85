use crate::{ApiError, ApiResult, DayCell};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["m", "t", "w", "t", "f", "s", "s"];

/// Grid cell with selection state applied. Only current-month cells can be
/// highlighted or selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub current: bool,
    pub highlighted: bool,
    pub selected: bool,
}

/// Cells for a Monday-first, seven-column month view.
///
/// Leading filler repeats the tail of the previous month; trailing filler is
/// numbered 1, 2, 3… until the row is complete. The result length is always a
/// multiple of 7.
pub fn build_grid(year: i32, month: u32) -> ApiResult<Vec<DayCell>> {
    let first = first_day_of_month(year, month)?;
    let offset = first.weekday().num_days_from_monday();
    let days = days_in_month(year, month)?;
    let (prev_year, prev_month) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
    let prev_days = days_in_month(prev_year, prev_month)?;

    let leading = (0..offset).map(|i| DayCell {
        day: prev_days - offset + 1 + i,
        current: false,
    });
    let current = (1..=days).map(|day| DayCell { day, current: true });

    let mut cells: Vec<DayCell> = leading.chain(current).collect();
    let mut next_day = 1;
    while cells.len() % 7 != 0 {
        cells.push(DayCell { day: next_day, current: false });
        next_day += 1;
    }
    Ok(cells)
}

/// Apply highlighted days and the selected day to a grid.
///
/// A selected day only shows as selected when it is also highlighted.
pub fn annotate_grid(
    cells: &[DayCell],
    highlighted: &BTreeSet<u32>,
    selected: Option<u32>,
) -> Vec<CalendarCell> {
    cells
        .iter()
        .map(|cell| {
            let highlighted = cell.current && highlighted.contains(&cell.day);
            CalendarCell {
                day: cell.day,
                current: cell.current,
                highlighted,
                selected: highlighted && selected == Some(cell.day),
            }
        })
        .collect()
}

pub fn days_in_month(year: i32, month: u32) -> ApiResult<u32> {
    let first = first_day_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next = first_day_of_month(next_year, next_month)?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// `Aug 2025`
pub fn month_label(year: i32, month: u32) -> ApiResult<String> {
    let name = month_abbreviation(month)?;
    Ok(format!("{name} {year}"))
}

pub fn month_abbreviation(month: u32) -> ApiResult<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
        .copied()
        .ok_or(ApiError::InvalidMonth(month))
}

fn first_day_of_month(year: i32, month: u32) -> ApiResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ApiError::InvalidMonth(month))
}
