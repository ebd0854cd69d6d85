use crate::components::calendar::{CALENDAR_HEIGHT, CALENDAR_WIDTH};
use tui::layout::{Constraint, Layout, Rect, Size};

pub const TAB_BAR_HEIGHT: u16 = 3;
/// Search / sport filter line above the panes.
pub const FILTER_BAR_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 10;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub filter_bar: Rect,
    pub calendar: Rect,
    pub list: Rect,
    pub logs: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (tab_bar, rest) = if full_screen {
            ([Rect::ZERO, Rect::ZERO], area)
        } else {
            let [tab, rest] =
                Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Fill(1)]).areas(area);
            (Self::split_tab_bar(tab), rest)
        };

        let (rest, logs) = if show_logs {
            let [rest, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)]).areas(rest);
            (rest, logs)
        } else {
            (rest, Rect::ZERO)
        };

        let [filter_bar, panes] =
            Layout::vertical([Constraint::Length(FILTER_BAR_HEIGHT), Constraint::Fill(1)]).areas(rest);

        // Border adds one column/row on each side.
        let [left, list] =
            Layout::horizontal([Constraint::Length(CALENDAR_WIDTH + 2), Constraint::Fill(1)]).areas(panes);
        let [calendar, _] =
            Layout::vertical([Constraint::Length(CALENDAR_HEIGHT + 2), Constraint::Fill(1)]).areas(left);

        LayoutAreas { tab_bar, filter_bar, calendar, list, logs }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_gets_a_fixed_box() {
        let layout = LayoutAreas::new(Size::new(100, 40));
        assert_eq!(layout.calendar.width, CALENDAR_WIDTH + 2);
        assert_eq!(layout.calendar.height, CALENDAR_HEIGHT + 2);
        assert_eq!(layout.calendar.y, TAB_BAR_HEIGHT + FILTER_BAR_HEIGHT);
        assert_eq!(layout.list.x, CALENDAR_WIDTH + 2);
        assert_eq!(layout.logs, Rect::ZERO);
    }

    #[test]
    fn full_screen_drops_the_tab_bar_and_logs_take_the_bottom() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        layout.update(Rect::new(0, 0, 100, 40), true, true);
        assert_eq!(layout.tab_bar[0], Rect::ZERO);
        assert_eq!(layout.filter_bar.y, 0);
        assert_eq!(layout.logs.height, LOG_PANE_HEIGHT);
        assert_eq!(layout.logs.bottom(), 40);
    }
}
