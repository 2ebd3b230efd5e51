//! Pure folds over an event log.
//!
//! Everything here is derived on demand from `&[MatchEvent]`. Nothing
//! is cached or stored, so score and totals can never drift from the
//! log they came from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EventTeam, EventType, MatchEvent};

/// Event count per type. Types with a zero count are omitted; the CSV
/// export fills zeros from its fixed column list instead.
pub type TypeCounts = BTreeMap<EventType, u32>;

/// Per-jersey-number counts. Unattributed events never appear here.
pub type PlayerTotals = BTreeMap<u8, TypeCounts>;

/// Running score for the tracked club, Gaelic scoring: a goal is worth
/// three points, a two-pointer two, a point one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    pub goals: u32,
    pub points: u32,
    pub two_points: u32,
    pub total_points: u32,
}

/// Elapsed seconds as `MM:SS`. Minutes are unbounded and never wrap:
/// 4503 seconds renders as `75:03`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("clock must be MM:SS with seconds under 60, got {input:?}")]
pub struct ClockParseError {
    input: String,
}

/// Parse an `MM:SS` clock back to elapsed seconds.
///
/// Inverse of [`format_clock`]: minutes may run past two digits, the
/// seconds part must stay under 60.
pub fn parse_clock(input: &str) -> Result<u32, ClockParseError> {
    let err = || ClockParseError {
        input: input.to_string(),
    };

    let (minutes, seconds) = input.split_once(':').ok_or_else(err)?;
    let minutes: u32 = minutes.parse().map_err(|_| err())?;
    let seconds: u32 = seconds.parse().map_err(|_| err())?;
    if seconds >= 60 {
        return Err(err());
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(err)
}

/// Derive the club's score from the log.
///
/// Only `BALLA` scoring events count; the opposition's tally is not
/// tracked here. Order independent.
pub fn score_from_events(events: &[MatchEvent]) -> Score {
    let mut score = Score::default();
    for event in events {
        if event.team != EventTeam::Balla {
            continue;
        }
        match event.event_type {
            EventType::Goal => score.goals += 1,
            EventType::Point => score.points += 1,
            EventType::TwoPoint => score.two_points += 1,
            _ => {}
        }
    }
    score.total_points = score.goals * 3 + score.two_points * 2 + score.points;
    score
}

/// Count every event by type, both teams together. The counts always
/// sum back to `events.len()`.
pub fn team_totals(events: &[MatchEvent]) -> TypeCounts {
    let mut totals = TypeCounts::new();
    for event in events {
        *totals.entry(event.event_type).or_insert(0) += 1;
    }
    totals
}

/// Count attributed events per jersey number. Events logged without a
/// number are excluded entirely rather than pooled under a sentinel.
pub fn per_player_totals(events: &[MatchEvent]) -> PlayerTotals {
    let mut totals = PlayerTotals::new();
    for event in events {
        if let Some(number) = event.player_number {
            *totals
                .entry(number)
                .or_default()
                .entry(event.event_type)
                .or_insert(0) += 1;
        }
    }
    totals
}
