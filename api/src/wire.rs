//! Raw wire types: serde shapes for the sports list and tournament endpoints.
//! These map to the clean domain types in normalize.rs.
//!
//! Field names drifted between API versions, so the identifier of a sport can
//! arrive as `sport_id`, `sport_code` or `id`. Each alias is its own field here
//! (rather than a serde alias) so that payloads carrying several of them still
//! deserialize; normalize.rs picks the first one present.
use crate::SportId;
use serde::Deserialize;

pub const STATUS_SUCCESS: &str = "success";

// ---------------------------------------------------------------------------
// Sports list  (GET /sportslist)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SportsListResponse {
    pub status: Option<String>,
    pub data: Option<Vec<RawSport>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSport {
    pub sport_id: Option<SportId>,
    pub sport_code: Option<SportId>,
    pub id: Option<SportId>,
    pub sport_name: Option<String>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Tournaments  (GET /tournament/demo)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TournamentsResponse {
    pub status: Option<String>,
    pub msg: Option<String>,
    pub err: Option<serde_json::Value>,
    pub data: Option<Vec<RawSportGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSportGroup {
    pub sport_id: Option<SportId>,
    pub sport_code: Option<SportId>,
    pub id: Option<SportId>,
    pub sport_name: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub tournaments: Vec<RawTournament>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawTournament {
    pub id: i64,
    pub name: String,
    pub tournament_img_url: Option<String>,
    pub level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Some payloads send `null` instead of an empty list.
    pub matches: Option<Vec<RawMatch>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawMatch {
    pub id: i64,
    pub stage: Option<String>,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub start_time: Option<String>,
    pub venue: Option<String>,
    pub status: Option<String>,
}

impl RawSport {
    pub fn identifier(&self) -> Option<&SportId> {
        self.sport_id.as_ref().or(self.sport_code.as_ref()).or(self.id.as_ref())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.sport_name.as_deref().or(self.name.as_deref())
    }
}

impl RawSportGroup {
    pub fn identifier(&self) -> Option<&SportId> {
        self.sport_id.as_ref().or(self.sport_code.as_ref()).or(self.id.as_ref())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.sport_name.as_deref().or(self.name.as_deref())
    }
}
