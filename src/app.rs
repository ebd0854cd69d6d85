use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Focus};
use std::sync::Arc;
use tourcal_api::calendar::days_in_month;
use tourcal_api::pagination::LoadToken;
use tourcal_api::store::TournamentStore;
use tourcal_api::{ApiResult, LikedSet, Sport, Tournament};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Calendar,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    store: Arc<dyn TournamentStore>,
}

impl App {
    pub fn new(store: Arc<dyn TournamentStore>) -> Self {
        let settings = AppSettings::load();
        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);

        Self { settings, state: AppState::new(), store }
    }

    pub fn store(&self) -> Arc<dyn TournamentStore> {
        self.store.clone()
    }

    // -----------------------------------------------------------------------
    // Load handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_cache_loaded(&mut self, tournaments: Option<Vec<Tournament>>) {
        self.state.screen.on_cache_loaded(tournaments);
        self.clamp_list_cursor();
    }

    pub fn on_liked_loaded(&mut self, liked: LikedSet) {
        log::debug!("{} liked tournaments restored", liked.len());
        self.state.liked = liked;
    }

    pub fn on_sports_loaded(&mut self, sports: Vec<Sport>) {
        self.state.screen.on_sports_loaded(sports);
        let len = self.state.screen.sports().len();
        self.state.sport_cursor = self.state.sport_cursor.min(len.saturating_sub(1));
    }

    /// Apply a fetch result and return the tournaments to write to the cache,
    /// if live data arrived.
    pub fn on_tournaments_loaded(&mut self, result: ApiResult<Vec<Tournament>>) -> Option<Vec<Tournament>> {
        let replaced = self.state.screen.on_tournaments_loaded(result);
        self.state.list_cursor = 0;
        replaced.then(|| self.state.screen.tournaments().to_vec())
    }

    // -----------------------------------------------------------------------
    // Tab and pane management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    /// Switch between the calendar and the tournament list.
    pub fn cycle_focus(&mut self) {
        self.state.focus = match self.state.focus {
            Focus::Calendar => Focus::List,
            _ => Focus::Calendar,
        };
    }

    // -----------------------------------------------------------------------
    // Calendar
    // -----------------------------------------------------------------------

    /// Move the day cursor by `delta` days, stopping at the month's edges.
    pub fn move_day_cursor(&mut self, delta: i64) {
        let last = self.days_in_view();
        let target = i64::from(self.state.day_cursor) + delta;
        if (1..=i64::from(last)).contains(&target) {
            self.state.day_cursor = target as u32;
        }
    }

    pub fn change_month(&mut self, delta: i64) {
        self.state.screen.change_month(delta);
        self.state.day_cursor = self.state.day_cursor.min(self.days_in_view());
        self.state.list_cursor = 0;
    }

    pub fn select_day_at_cursor(&mut self) {
        self.state.screen.select_day(self.state.day_cursor);
        self.state.list_cursor = 0;
    }

    pub fn clear_day(&mut self) {
        self.state.screen.clear_day();
        self.state.list_cursor = 0;
    }

    fn days_in_view(&self) -> u32 {
        let screen = &self.state.screen;
        days_in_month(screen.year(), screen.month()).unwrap_or(28)
    }

    // -----------------------------------------------------------------------
    // Search and sport filter
    // -----------------------------------------------------------------------

    pub fn begin_search(&mut self) {
        if self.state.focus != Focus::Search {
            self.state.previous_focus = self.state.focus;
            self.state.focus = Focus::Search;
        }
    }

    pub fn search_push(&mut self, c: char) {
        let mut text = self.state.screen.params().search_text.clone();
        text.push(c);
        self.set_search(text);
    }

    pub fn search_pop(&mut self) {
        let mut text = self.state.screen.params().search_text.clone();
        if text.pop().is_some() {
            self.set_search(text);
        }
    }

    pub fn end_search(&mut self) {
        self.state.focus = self.state.previous_focus;
    }

    fn set_search(&mut self, text: String) {
        self.state.screen.set_search(text);
        self.state.list_cursor = 0;
    }

    pub fn open_sport_picker(&mut self) {
        let current = &self.state.screen.params().sport_filter;
        self.state.sport_cursor = self
            .state
            .screen
            .sports()
            .iter()
            .position(|s| &s.as_filter() == current)
            .unwrap_or(0);
        if self.state.focus != Focus::SportPicker {
            self.state.previous_focus = self.state.focus;
            self.state.focus = Focus::SportPicker;
        }
    }

    pub fn move_sport_cursor(&mut self, delta: isize) {
        let len = self.state.screen.sports().len();
        if len == 0 {
            return;
        }
        let next = self.state.sport_cursor.saturating_add_signed(delta);
        self.state.sport_cursor = next.min(len - 1);
    }

    /// Apply the highlighted sport and close the picker.
    pub fn confirm_sport(&mut self) {
        if let Some(sport) = self.state.screen.sports().get(self.state.sport_cursor) {
            let filter = sport.as_filter();
            log::debug!("sport filter set to {}", sport.name);
            self.state.screen.set_sport_filter(filter);
            self.state.list_cursor = 0;
        }
        self.close_sport_picker();
    }

    pub fn close_sport_picker(&mut self) {
        self.state.focus = self.state.previous_focus;
    }

    // -----------------------------------------------------------------------
    // Tournament list
    // -----------------------------------------------------------------------

    pub fn selected_tournament(&self) -> Option<&Tournament> {
        self.state.screen.visible_page().get(self.state.list_cursor).copied()
    }

    /// Move down one row. At the end of the page this starts a load-more
    /// request instead and returns its token; the caller settles it with
    /// [`App::finish_load_more`].
    pub fn list_down(&mut self) -> Option<LoadToken> {
        let visible = self.state.screen.visible_page().len();
        if self.state.list_cursor + 1 < visible {
            self.state.list_cursor += 1;
            return None;
        }
        self.state.screen.begin_load_more()
    }

    pub fn list_up(&mut self) {
        self.state.list_cursor = self.state.list_cursor.saturating_sub(1);
    }

    pub fn finish_load_more(&mut self, token: LoadToken) {
        if self.state.screen.finish_load_more(token) {
            self.list_down();
        }
    }

    pub fn toggle_expanded(&mut self) {
        if let Some(id) = self.selected_tournament().map(|t| t.id) {
            self.state.toggle_expanded(id);
        }
    }

    /// Flip the liked flag of the selected tournament and return the set to
    /// persist.
    pub fn toggle_liked(&mut self) -> Option<LikedSet> {
        let id = self.selected_tournament()?.id;
        let liked = self.state.liked.toggle(id);
        log::debug!("tournament {id} liked: {liked}");
        Some(self.state.liked.clone())
    }

    fn clamp_list_cursor(&mut self) {
        let visible = self.state.screen.visible_page().len();
        self.state.list_cursor = self.state.list_cursor.min(visible.saturating_sub(1));
    }
}
