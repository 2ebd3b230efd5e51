use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::events::{EventTeam, EventType, MatchEvent};
use super::fresh_id;

/// Which side of the fixture the club plays.
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
pub enum Side {
    Home,
    Away,
}

fn default_half_minutes() -> u16 {
    30
}

fn default_max_number() -> u8 {
    25
}

/// One fixture and its full event log.
///
/// The log is the source of truth: score and totals are always derived
/// from it, never stored. Wire format is camelCase JSON with epoch
/// millisecond instants, compatible with blobs written by earlier
/// builds of the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub opponent: String,
    pub venue: String,
    pub side: Side,
    #[serde(rename = "matchDateISO")]
    pub match_date: NaiveDate,
    /// Configured half length in minutes. Informational only: the match
    /// clock is operator-driven and never derived from this.
    #[serde(default = "default_half_minutes")]
    pub half_minutes: u16,
    /// Highest jersey number the panel editor offers.
    #[serde(default = "default_max_number")]
    pub max_number: u8,
    /// Jersey number to advisory name. Names may be empty or missing;
    /// event attribution does not require panel membership.
    #[serde(default)]
    pub panel: BTreeMap<u8, String>,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
}

impl Match {
    /// Create an empty match record with generated id and defaults.
    pub fn new(
        opponent: impl Into<String>,
        venue: impl Into<String>,
        side: Side,
        match_date: NaiveDate,
    ) -> Self {
        Self {
            id: fresh_id("match"),
            created_at: Utc::now(),
            opponent: opponent.into(),
            venue: venue.into(),
            side,
            match_date,
            half_minutes: default_half_minutes(),
            max_number: default_max_number(),
            panel: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Fixture title as shown in listings.
    pub fn display_title(&self) -> String {
        format!("Balla vs {}", self.opponent)
    }

    /// Log one event against this match, returning the stored record.
    pub fn append_event(
        &mut self,
        team: EventTeam,
        event_type: EventType,
        clock_seconds: u32,
        player_number: Option<u8>,
    ) -> MatchEvent {
        let event = MatchEvent::new(&self.id, team, event_type, clock_seconds, player_number);
        self.events.push(event.clone());
        event
    }

    /// Remove and return the most recently created event, if any.
    ///
    /// Selection is by creation instant rather than position, so a log
    /// stored newest-first by another writer still undoes the right
    /// event. Instant ties go to the later entry.
    pub fn undo_last(&mut self) -> Option<MatchEvent> {
        let newest = self
            .events
            .iter()
            .enumerate()
            .max_by_key(|(_, event)| event.ts)
            .map(|(idx, _)| idx)?;
        Some(self.events.remove(newest))
    }

    /// Record a name against a jersey number. Empty names are kept:
    /// the panel tracks numbers, names are advisory.
    pub fn set_panel_name(&mut self, number: u8, name: impl Into<String>) {
        self.panel.insert(number, name.into());
    }

    /// Drop a jersey number from the panel, returning its name.
    pub fn remove_panel_entry(&mut self, number: u8) -> Option<String> {
        self.panel.remove(&number)
    }
}
