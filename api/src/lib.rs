pub mod calendar;
pub mod client;
pub mod datetime;
pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod screen;
pub mod store;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub use client::{ApiError, ApiResult};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the wire format
// ---------------------------------------------------------------------------

/// Sport identifier. Most payloads send an integer; older sports lists only
/// carry a code, and entries with neither get a synthetic `sport_<name>` code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SportId {
    Numeric(i64),
    Code(String),
}

impl SportId {
    /// Numeric view of the id. Codes that are plain integers ("4") count.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            SportId::Numeric(n) => Some(*n),
            SportId::Code(code) => code.trim().parse().ok(),
        }
    }

    /// Filter equality: numeric when both sides have a numeric view,
    /// exact code comparison otherwise.
    pub fn matches(&self, other: &SportId) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl fmt::Display for SportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SportId::Numeric(n) => write!(f, "{n}"),
            SportId::Code(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sport {
    pub id: SportId,
    pub name: String,
}

/// Selection in the sport picker. `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SportFilter {
    #[default]
    All,
    Sport(SportId),
}

impl SportFilter {
    pub const SENTINEL_ID: &'static str = "ALL";
    pub const SENTINEL_NAME: &'static str = "All";

    pub fn accepts(&self, sport_id: &SportId) -> bool {
        match self {
            SportFilter::All => true,
            SportFilter::Sport(wanted) => wanted.matches(sport_id),
        }
    }
}

impl Sport {
    /// The picker entry standing for [`SportFilter::All`].
    pub fn sentinel() -> Self {
        Self {
            id: SportId::Code(SportFilter::SENTINEL_ID.to_owned()),
            name: SportFilter::SENTINEL_NAME.to_owned(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SportId::Code(SportFilter::SENTINEL_ID.to_owned())
    }

    pub fn as_filter(&self) -> SportFilter {
        if self.is_sentinel() {
            SportFilter::All
        } else {
            SportFilter::Sport(self.id.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub stage: String,
    pub team_a: String,
    pub team_b: String,
    /// Raw timestamp as delivered; may be empty or malformed.
    pub start_time: String,
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    #[serde(rename = "tournament_img_url")]
    pub image_url: String,
    pub level: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// API order is kept.
    #[serde(default)]
    pub matches: Vec<Match>,
    pub sport_id: SportId,
    pub sport_name: String,
}

impl Tournament {
    /// Effective span of the tournament: its own bounds widened to cover every
    /// match. `now` stands in for an unparseable start date.
    pub fn display_span(&self, now: DateTime<Utc>) -> DateSpan {
        let start = match datetime::parse_instant(&self.start_date) {
            Ok(start) => start,
            Err(e) => {
                log::debug!("tournament {} ({}): {e}, using current time", self.id, self.name);
                now
            }
        };

        let end = match self.end_date.as_deref() {
            None => start,
            Some(raw) => datetime::parse_instant(raw).unwrap_or_else(|e| {
                log::debug!("tournament {} ({}): {e}, using start date", self.id, self.name);
                start
            }),
        };

        self.match_instants().fold(DateSpan { start, end }, |span, at| DateSpan {
            start: span.start.min(at),
            end: span.end.max(at),
        })
    }

    /// Instants of all matches. A match without a usable `start_time` borrows
    /// the tournament start date; it is skipped if that is unusable too.
    pub fn match_instants(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.matches.iter().filter_map(|m| {
            datetime::parse_instant(&m.start_time)
                .or_else(|_| datetime::parse_instant(&self.start_date))
                .ok()
        })
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Inclusive instant range in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One cell of the month grid. Filler cells (`current == false`) are visual only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub current: bool,
}

/// Liked tournament ids. Persisted as a plain JSON array; order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikedSet(HashSet<i64>);

impl LikedSet {
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Flip membership of `id`; returns whether it is liked afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<i64> for LikedSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
