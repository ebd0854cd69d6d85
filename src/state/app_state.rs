use crate::app::MenuItem;
use std::collections::HashSet;
use tourcal_api::LikedSet;
use tourcal_api::screen::CalendarScreen;

/// Which pane receives navigation keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Calendar,
    List,
    /// Typing edits the search text.
    Search,
    SportPicker,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub focus: Focus,
    /// Focus to return to when search or the sport picker closes.
    pub previous_focus: Focus,
    pub screen: CalendarScreen,
    pub liked: LikedSet,
    /// Tournaments whose match list is unfolded. Never persisted.
    pub expanded: HashSet<i64>,
    /// Day of month under the calendar cursor.
    pub day_cursor: u32,
    /// Row of the tournament list under the cursor.
    pub list_cursor: usize,
    /// Highlighted row in the sport picker.
    pub sport_cursor: usize,
    pub show_logs: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self { day_cursor: 1, ..Self::default() }
    }

    /// Flip the expanded flag for `id`, returning the new value.
    pub fn toggle_expanded(&mut self, id: i64) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }
}
