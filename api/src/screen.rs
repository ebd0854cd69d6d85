use crate::calendar::{CalendarCell, annotate_grid, build_grid};
use crate::filter::{FilterParams, MonthWindow, highlighted_days, visible_tournaments};
use crate::pagination::{LoadToken, Pager};
use crate::{ApiResult, Sport, SportFilter, Tournament};
use std::collections::BTreeSet;

/// Where the tournaments on screen came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataSource {
    #[default]
    Empty,
    Cached,
    Live,
}

/// State of one calendar screen: the loaded data plus the user's filter choices.
///
/// Loads may complete in any order. Nothing here requires the sports list to
/// be present before tournaments are shown.
#[derive(Debug, Clone)]
pub struct CalendarScreen {
    tournaments: Vec<Tournament>,
    sports: Vec<Sport>,
    source: DataSource,
    params: FilterParams,
    pager: Pager,
    pub last_error: Option<String>,
}

impl Default for CalendarScreen {
    fn default() -> Self {
        Self::new(MonthWindow::default())
    }
}

impl CalendarScreen {
    pub fn new(window: MonthWindow) -> Self {
        Self {
            tournaments: Vec::new(),
            sports: vec![Sport::sentinel()],
            source: DataSource::Empty,
            params: FilterParams {
                window,
                selected_month: window.first_month,
                ..FilterParams::default()
            },
            pager: Pager::default(),
            last_error: None,
        }
    }

    // -----------------------------------------------------------------------
    // Data arrival
    // -----------------------------------------------------------------------

    /// Show cached tournaments, unless live data already arrived.
    pub fn on_cache_loaded(&mut self, cached: Option<Vec<Tournament>>) {
        let Some(cached) = cached else {
            return;
        };
        if self.source == DataSource::Live {
            log::debug!("ignoring cache, live data already loaded");
            return;
        }
        log::debug!("showing {} cached tournaments", cached.len());
        self.tournaments = cached;
        self.source = DataSource::Cached;
        if self.last_error.is_some() {
            self.last_error = Some(self.failure_notice());
        }
        self.clamp_selection();
    }

    pub fn on_sports_loaded(&mut self, mut sports: Vec<Sport>) {
        if !sports.first().is_some_and(Sport::is_sentinel) {
            sports.retain(|s| !s.is_sentinel());
            sports.insert(0, Sport::sentinel());
        }
        self.sports = sports;
    }

    /// Apply the result of a tournament fetch. Returns `true` when live data
    /// replaced what was shown; the caller then refreshes the cache.
    ///
    /// Failure keeps whatever is on screen and records a notice. Cached data
    /// arriving later still fills an empty screen.
    pub fn on_tournaments_loaded(&mut self, result: ApiResult<Vec<Tournament>>) -> bool {
        let replaced = match result {
            Ok(tournaments) => {
                self.tournaments = tournaments;
                self.source = DataSource::Live;
                self.last_error = None;
                true
            }
            Err(e) => {
                log::error!("tournament fetch failed: {e}");
                self.last_error = Some(self.failure_notice());
                false
            }
        };
        self.clamp_selection();
        replaced
    }

    fn failure_notice(&self) -> String {
        match self.source {
            DataSource::Empty => "Failed to load tournaments.",
            DataSource::Cached => "Failed to load tournaments. Showing cached data.",
            DataSource::Live => "Failed to refresh tournaments.",
        }
        .to_owned()
    }

    // -----------------------------------------------------------------------
    // User input
    // -----------------------------------------------------------------------

    /// Move the visible month by `delta`, staying inside the window. Always
    /// clears the day selection and returns to the first page.
    pub fn change_month(&mut self, delta: i64) {
        let target = i64::from(self.params.selected_month) + delta;
        self.params.selected_month = self.params.window.clamp_month(target);
        self.params.selected_day = None;
        self.pager.reset();
    }

    /// Select `day` of the current month if it has tournaments. Any other
    /// choice (a quiet day, or the already selected day) clears the selection.
    pub fn select_day(&mut self, day: u32) {
        if self.params.selected_day != Some(day) && self.highlighted_days().contains(&day) {
            self.params.selected_day = Some(day);
        } else {
            self.clear_day();
        }
        self.pager.reset();
    }

    pub fn clear_day(&mut self) {
        self.params.selected_day = None;
        self.pager.reset();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.params.search_text = text.into();
        self.pager.reset();
    }

    pub fn set_sport_filter(&mut self, filter: SportFilter) {
        self.params.sport_filter = filter;
        self.params.selected_day = None;
        self.pager.reset();
    }

    pub fn begin_load_more(&mut self) -> Option<LoadToken> {
        let total = self.filtered().len();
        self.pager.begin_load_more(total)
    }

    /// Settle the load-more request `token` belongs to. Stale tokens are
    /// ignored.
    pub fn finish_load_more(&mut self, token: LoadToken) -> bool {
        let total = self.filtered().len();
        self.pager.finish_load_more(token, total)
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    pub fn filtered(&self) -> Vec<&Tournament> {
        visible_tournaments(&self.tournaments, &self.params)
    }

    /// The current page of filtered tournaments.
    pub fn visible_page(&self) -> Vec<&Tournament> {
        let mut filtered = self.filtered();
        filtered.truncate(self.pager.visible_len(filtered.len()));
        filtered
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }

    pub fn highlighted_days(&self) -> BTreeSet<u32> {
        highlighted_days(&self.tournaments, &self.params.window, self.params.selected_month)
    }

    pub fn grid(&self) -> ApiResult<Vec<CalendarCell>> {
        let cells = build_grid(self.params.window.year, self.params.selected_month)?;
        Ok(annotate_grid(&cells, &self.highlighted_days(), self.params.selected_day))
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn sports(&self) -> &[Sport] {
        &self.sports
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn year(&self) -> i32 {
        self.params.window.year
    }

    pub fn month(&self) -> u32 {
        self.params.selected_month
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.params.selected_day
    }

    /// A selected day whose tournaments vanished with a reload is dropped.
    fn clamp_selection(&mut self) {
        if let Some(day) = self.params.selected_day
            && !self.highlighted_days().contains(&day)
        {
            self.params.selected_day = None;
        }
        self.pager.reset();
    }
}
