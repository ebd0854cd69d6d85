use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use tourcal_api::pagination::LoadToken;
use tourcal_api::{ApiResult, LikedSet, Sport, Tournament};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSports,
    LoadTournaments,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    SportsLoaded { sports: Vec<Sport> },
    /// Failures are carried through so the screen can fall back to the cache.
    TournamentsLoaded { result: ApiResult<Vec<Tournament>> },
}

/// Results of reads against the local store.
#[derive(Debug)]
pub enum StorageEvent {
    CacheLoaded { tournaments: Option<Vec<Tournament>> },
    LikedLoaded { liked: LikedSet },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// The load-more settle timer fired.
    LoadMoreSettled(LoadToken),
}
