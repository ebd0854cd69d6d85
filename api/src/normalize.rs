use crate::datetime::parse_instant;
use crate::wire::{
    RawMatch, RawSport, RawSportGroup, RawTournament, STATUS_SUCCESS, SportsListResponse,
    TournamentsResponse,
};
use crate::{ApiError, ApiResult, Match, Sport, SportId, Tournament};
use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

/// Decode and normalize a tournament payload body.
pub fn parse_tournaments(body: &str, now: DateTime<Utc>) -> ApiResult<Vec<Tournament>> {
    let raw: TournamentsResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedPayload(format!("invalid tournament json: {e}")))?;
    normalize_tournaments(raw, now)
}

/// Flatten the per-sport tournament lists into one sequence sorted by start date.
///
/// Every tournament carries its sport's id and name. Tournaments whose start
/// date does not parse sort as if they started at `now`; none are dropped.
pub fn normalize_tournaments(raw: TournamentsResponse, now: DateTime<Utc>) -> ApiResult<Vec<Tournament>> {
    let status = raw.status.as_deref().unwrap_or_default();
    if status != STATUS_SUCCESS {
        let detail = raw.msg.filter(|m| !m.is_empty()).unwrap_or_else(|| "no message".into());
        return Err(ApiError::MalformedPayload(format!("status {status:?}: {detail}")));
    }
    let groups = raw
        .data
        .ok_or_else(|| ApiError::MalformedPayload("missing data array".into()))?;

    let mut tournaments = Vec::new();
    for group in groups {
        tournaments.extend(map_sport_group(group)?);
    }

    tournaments.sort_by_key(|t| parse_instant(&t.start_date).unwrap_or(now));
    Ok(tournaments)
}

fn map_sport_group(group: RawSportGroup) -> ApiResult<Vec<Tournament>> {
    let Some(sport_id) = usable_id(group.identifier()) else {
        return Err(ApiError::MalformedPayload(format!(
            "sport entry {:?} has no sport_id, sport_code or id",
            group.display_name().unwrap_or("<unnamed>")
        )));
    };
    let sport_name = group.display_name().unwrap_or_default().to_owned();

    Ok(group
        .tournaments
        .into_iter()
        .map(|t| map_tournament(t, &sport_id, &sport_name))
        .collect())
}

fn map_tournament(raw: RawTournament, sport_id: &SportId, sport_name: &str) -> Tournament {
    Tournament {
        id: raw.id,
        name: raw.name,
        image_url: raw.tournament_img_url.unwrap_or_default(),
        level: raw.level.unwrap_or_default(),
        start_date: raw.start_date.unwrap_or_default(),
        end_date: raw.end_date.filter(|d| !d.trim().is_empty()),
        matches: raw.matches.unwrap_or_default().into_iter().map(map_match).collect(),
        sport_id: sport_id.clone(),
        sport_name: sport_name.to_owned(),
    }
}

fn map_match(raw: RawMatch) -> Match {
    Match {
        id: raw.id,
        stage: raw.stage.unwrap_or_default(),
        team_a: raw.team_a.unwrap_or_default(),
        team_b: raw.team_b.unwrap_or_default(),
        start_time: raw.start_time.unwrap_or_default(),
        venue: raw.venue.unwrap_or_default(),
        status: raw.status,
    }
}

/// Sports for the picker, sentinel first.
///
/// A non-success response leaves only the sentinel. Entries without any id
/// alias get a stable `sport_<name>` code so the picker can still offer them.
pub fn normalize_sports(raw: SportsListResponse) -> Vec<Sport> {
    let mut sports = vec![Sport::sentinel()];
    if raw.status.as_deref() != Some(STATUS_SUCCESS) {
        log::warn!("sports list status {:?}, showing only the sentinel", raw.status);
        return sports;
    }

    sports.extend(raw.data.unwrap_or_default().iter().enumerate().map(|(i, s)| map_sport(i, s)));
    sports
}

fn map_sport(index: usize, raw: &RawSport) -> Sport {
    let name = raw.display_name().unwrap_or_default().to_owned();
    let id = usable_id(raw.identifier()).unwrap_or_else(|| synthetic_sport_id(index, &name));
    Sport { id, name }
}

fn usable_id(id: Option<&SportId>) -> Option<SportId> {
    match id {
        Some(SportId::Code(code)) if code.trim().is_empty() => None,
        other => other.cloned(),
    }
}

fn synthetic_sport_id(index: usize, name: &str) -> SportId {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if slug.chars().all(|c| c == '_') {
        SportId::Code(format!("sport_{index}"))
    } else {
        SportId::Code(format!("sport_{slug}"))
    }
}
