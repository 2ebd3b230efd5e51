//! Spreadsheet exports.
//!
//! Two flat CSV views of one match: the chronological event log and the
//! per-player totals grid. Output is plain comma-joined text with no
//! quoting and no trailing newline, byte-stable for a given match so
//! downstream sheets can diff successive exports.

use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use crate::models::{EventType, Match, MatchEvent};
use crate::stats::per_player_totals;

/// Column order of the player-totals export. This is a compatibility
/// contract with downstream spreadsheets; append, never reorder.
pub const PLAYER_TOTALS_COLUMNS: [EventType; 15] = [
    EventType::Interception,
    EventType::TackleWon,
    EventType::Blockdown,
    EventType::TurnoverWon,
    EventType::TurnoverConceded,
    EventType::Point,
    EventType::TwoPoint,
    EventType::Goal,
    EventType::Wide,
    EventType::SavedOrShort,
    EventType::Assist,
    EventType::HomeKoWon,
    EventType::HomeKoLost,
    EventType::AwayKoWon,
    EventType::AwayKoLost,
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn plain_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let text = String::from_utf8(bytes)?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Chronological event export: `ts,clock,team,type,playerNumber`.
///
/// Rows are sorted ascending by creation instant regardless of how the
/// match stores its log. `ts` is RFC 3339 with milliseconds and a `Z`
/// suffix; the player column is empty for unattributed events.
pub fn events_csv(m: &Match) -> Result<String, ExportError> {
    let mut rows: Vec<&MatchEvent> = m.events.iter().collect();
    rows.sort_by_key(|event| event.ts);

    let mut writer = plain_writer();
    writer.write_record(["ts", "clock", "team", "type", "playerNumber"])?;
    for event in rows {
        writer.write_record([
            event.ts.to_rfc3339_opts(SecondsFormat::Millis, true),
            event.clock_seconds.to_string(),
            event.team.to_string(),
            event.event_type.to_string(),
            event
                .player_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
        ])?;
    }
    finish(writer)
}

/// Per-player totals export, one row per jersey number.
///
/// Rows cover the union of panel numbers and numbers seen in the log,
/// ascending. Zero counts are written out so every row has the full
/// column set. Panel names have embedded commas replaced by spaces to
/// keep the columns aligned under the no-quoting rule.
pub fn player_totals_csv(m: &Match) -> Result<String, ExportError> {
    let totals = per_player_totals(&m.events);

    let mut numbers: Vec<u8> = m.panel.keys().chain(totals.keys()).copied().collect();
    numbers.sort_unstable();
    numbers.dedup();

    let mut writer = plain_writer();
    let mut header = vec!["number".to_string(), "name".to_string()];
    header.extend(PLAYER_TOTALS_COLUMNS.iter().map(|t| t.to_string()));
    writer.write_record(&header)?;

    for number in numbers {
        let name = m
            .panel
            .get(&number)
            .map(|n| n.replace(',', " "))
            .unwrap_or_default();
        let counts = totals.get(&number);

        let mut row = vec![number.to_string(), name];
        row.extend(PLAYER_TOTALS_COLUMNS.iter().map(|event_type| {
            counts
                .and_then(|c| c.get(event_type))
                .copied()
                .unwrap_or(0)
                .to_string()
        }));
        writer.write_record(&row)?;
    }
    finish(writer)
}
