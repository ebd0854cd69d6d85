use tourcal_api::calendar::{CalendarCell, WEEKDAY_LABELS};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

/// Columns per day: two digits plus padding.
pub const CELL_WIDTH: u16 = 4;
/// Title row, weekday row, then up to six weeks.
pub const CALENDAR_HEIGHT: u16 = 2 + 6;
pub const CALENDAR_WIDTH: u16 = CELL_WIDTH * 7;

/// Month grid, Monday first.
///
/// ```text
///          Aug 2025
///   m   t   w   t   f   s   s
///  28  29  30  31  01  02  03
/// ```
pub struct CalendarView<'a> {
    pub title: &'a str,
    pub cells: &'a [CalendarCell],
    /// Day of the current month under the cursor, if the grid has focus.
    pub cursor: Option<u32>,
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CALENDAR_WIDTH || area.height < 3 {
            return;
        }

        let title_x = area.x + (CALENDAR_WIDTH.saturating_sub(self.title.len() as u16)) / 2;
        buf.set_string(
            title_x,
            area.y,
            self.title,
            Style::default().add_modifier(Modifier::BOLD),
        );

        for (col, label) in WEEKDAY_LABELS.iter().enumerate() {
            let x = area.x + col as u16 * CELL_WIDTH;
            buf.set_string(x, area.y + 1, format!("{label:>3}"), Style::default().fg(Color::Gray));
        }

        for (i, cell) in self.cells.iter().enumerate() {
            let row = (i / 7) as u16;
            let col = (i % 7) as u16;
            let y = area.y + 2 + row;
            if y >= area.bottom() {
                break;
            }
            let x = area.x + col * CELL_WIDTH + 1;
            buf.set_string(x, y, format!("{:02}", cell.day), cell_style(cell, self.cursor));
        }
    }
}

pub fn cell_style(cell: &CalendarCell, cursor: Option<u32>) -> Style {
    if !cell.current {
        return Style::default().fg(Color::DarkGray);
    }
    let mut style = Style::default();
    if cell.highlighted {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    if cell.selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if cursor == Some(cell.day) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tourcal_api::calendar::{annotate_grid, build_grid};

    fn august(highlighted: &[u32], selected: Option<u32>) -> Vec<CalendarCell> {
        let cells = build_grid(2025, 8).unwrap();
        let highlighted: BTreeSet<u32> = highlighted.iter().copied().collect();
        annotate_grid(&cells, &highlighted, selected)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn renders_title_weekdays_and_filler() {
        let cells = august(&[], None);
        let area = Rect::new(0, 0, CALENDAR_WIDTH, CALENDAR_HEIGHT);
        let mut buf = Buffer::empty(area);
        CalendarView { title: "Aug 2025", cells: &cells, cursor: None }.render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Aug 2025"));
        assert_eq!(row_text(&buf, 1).trim(), "m   t   w   t   f   s   s");
        assert_eq!(row_text(&buf, 2).trim(), "28  29  30  31  01  02  03");
        assert_eq!(buf[(1, 2)].fg, Color::DarkGray);
    }

    #[test]
    fn highlighted_and_selected_days_are_styled() {
        let cells = august(&[5, 12], Some(12));
        let style = |day: u32| {
            let cell = cells.iter().find(|c| c.current && c.day == day).unwrap();
            cell_style(cell, Some(1))
        };

        assert!(style(5).add_modifier.contains(Modifier::BOLD));
        assert!(!style(5).add_modifier.contains(Modifier::REVERSED));
        assert!(style(12).add_modifier.contains(Modifier::REVERSED));
        assert!(style(1).add_modifier.contains(Modifier::UNDERLINED));
        assert!(style(2).add_modifier.is_empty());
    }

    #[test]
    fn too_narrow_area_draws_nothing() {
        let cells = august(&[], None);
        let area = Rect::new(0, 0, 10, 8);
        let mut buf = Buffer::empty(area);
        CalendarView { title: "Aug 2025", cells: &cells, cursor: None }.render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "");
    }
}
