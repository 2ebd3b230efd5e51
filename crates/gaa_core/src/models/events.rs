use std::sync::Mutex;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::fresh_id;

/// Which side of the fixture an event belongs to: the club or the opposition.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EventTeam {
    /// The tracked club.
    Balla,
    /// The opposition, whoever they are on the day.
    Opp,
}

/// Everything the pitch-side operator can log.
///
/// This is a closed vocabulary: scoring, grouping and the export column
/// list all enumerate it exhaustively, so adding a variant is a compile
/// error at every consumer until the new tile is wired through.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EventType {
    HomeKoWon,
    HomeKoLost,
    AwayKoWon,
    AwayKoLost,
    Interception,
    TackleWon,
    Blockdown,
    TurnoverWon,
    TurnoverConceded,
    Point,
    TwoPoint,
    Goal,
    Wide,
    SavedOrShort,
    Assist,
}

impl EventType {
    /// Short label shown on logging tiles and summaries.
    pub fn label(self) -> &'static str {
        match self {
            EventType::HomeKoWon => "Home KO Won",
            EventType::HomeKoLost => "Home KO Lost",
            EventType::AwayKoWon => "Away KO Won",
            EventType::AwayKoLost => "Away KO Lost",
            EventType::Interception => "Interception",
            EventType::TackleWon => "Tackle Won",
            EventType::Blockdown => "Blockdown",
            EventType::TurnoverWon => "Turnover Won",
            EventType::TurnoverConceded => "Turnover Conceded",
            EventType::Point => "Point",
            EventType::TwoPoint => "2-Point Score",
            EventType::Goal => "Goal",
            EventType::Wide => "Wide",
            EventType::SavedOrShort => "Saved/Short",
            EventType::Assist => "Assist",
        }
    }
}

/// A titled section of the vocabulary, in the order the logging screen
/// presents them.
#[derive(Debug, Clone, Copy)]
pub struct EventGroup {
    pub title: &'static str,
    pub types: &'static [EventType],
}

/// Presentation partition of the vocabulary. Every variant appears in
/// exactly one group; the contract test keeps the partition total.
pub const EVENT_GROUPS: [EventGroup; 4] = [
    EventGroup {
        title: "Kickouts",
        types: &[
            EventType::HomeKoWon,
            EventType::HomeKoLost,
            EventType::AwayKoWon,
            EventType::AwayKoLost,
        ],
    },
    EventGroup {
        title: "Defence",
        types: &[
            EventType::Interception,
            EventType::TackleWon,
            EventType::Blockdown,
        ],
    },
    EventGroup {
        title: "Turnovers",
        types: &[EventType::TurnoverWon, EventType::TurnoverConceded],
    },
    EventGroup {
        title: "Attack",
        types: &[
            EventType::Point,
            EventType::TwoPoint,
            EventType::Goal,
            EventType::Wide,
            EventType::SavedOrShort,
            EventType::Assist,
        ],
    },
];

/// One logged fact from the sideline.
///
/// Events are immutable once appended; a mistake is corrected by undoing
/// and logging again. `ts` is the wall-clock creation instant (epoch
/// milliseconds on the wire) while `clock_seconds` is operator game time,
/// so the two advance independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: String,
    pub match_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
    /// Elapsed match-clock seconds at the moment of logging.
    pub clock_seconds: u32,
    pub team: EventTeam,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Jersey number, when the operator attributed the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_number: Option<u8>,
}

impl MatchEvent {
    /// Build a fully formed event with a fresh id and a creation instant
    /// that never runs backwards within this process.
    pub fn new(
        match_id: impl Into<String>,
        team: EventTeam,
        event_type: EventType,
        clock_seconds: u32,
        player_number: Option<u8>,
    ) -> Self {
        Self {
            id: fresh_id("evt"),
            match_id: match_id.into(),
            ts: monotonic_now(),
            clock_seconds,
            team,
            event_type,
            player_number,
        }
    }
}

// Wall clocks can step backwards under NTP; undo ordering must not.
static LAST_ISSUED_TS: Lazy<Mutex<DateTime<Utc>>> =
    Lazy::new(|| Mutex::new(DateTime::<Utc>::MIN_UTC));

fn monotonic_now() -> DateTime<Utc> {
    let now = Utc::now();
    let mut last = LAST_ISSUED_TS.lock().unwrap();
    let issued = if now > *last { now } else { *last };
    *last = issued;
    issued
}
