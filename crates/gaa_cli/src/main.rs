//! Match-Day Stats CLI
//!
//! Terminal front end for the Balla GAA tracker: create a match, name
//! the panel, log events against the running clock, undo mistakes and
//! export the CSV views.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use gaa_core::{
    events_csv, format_clock, parse_clock, player_totals_csv, score_from_events, team_totals,
    EventTeam, EventType, FileMatchStore, Match, MatchEvent, MatchStore, Score, Side,
    EVENT_GROUPS, SCHEMA_VERSION,
};

#[derive(Parser)]
#[command(name = "gaa_stats")]
#[command(about = "Match-day statistics tracker for Balla GAA", long_about = None)]
struct Cli {
    /// Match store file (defaults to matches_v1.json under the user data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a match record
    New {
        /// Opposition club name
        #[arg(long)]
        opponent: String,

        /// Venue text
        #[arg(long, default_value = "Balla")]
        venue: String,

        /// HOME or AWAY
        #[arg(long, default_value = "HOME")]
        side: Side,

        /// Match date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List stored matches, newest first
    List,

    /// Score, totals, panel and recent events for one match
    Show {
        /// Match id
        id: String,
    },

    /// Adjust half length or panel size
    Setup {
        /// Match id
        id: String,

        /// Half length in minutes
        #[arg(long)]
        half_minutes: Option<u16>,

        /// Highest jersey number the panel offers
        #[arg(long)]
        max_number: Option<u8>,
    },

    /// Name a jersey number in the panel (omit the name to clear it)
    Panel {
        /// Match id
        id: String,

        /// Jersey number
        number: u8,

        /// Player name
        name: Option<String>,
    },

    /// Log one event against the running clock
    Log {
        /// Match id
        id: String,

        /// Event type, e.g. point, goal, turnover_won
        #[arg(long)]
        event: EventType,

        /// BALLA or OPP
        #[arg(long, default_value = "BALLA")]
        team: EventTeam,

        /// Match clock as MM:SS or raw seconds
        #[arg(long)]
        clock: String,

        /// Jersey number (omit for an unattributed event)
        #[arg(long)]
        player: Option<u8>,
    },

    /// Remove the most recently logged event
    Undo {
        /// Match id
        id: String,
    },

    /// Write the CSV exports (use - for stdout)
    Export {
        /// Match id
        id: String,

        /// Events CSV destination
        #[arg(long)]
        events: Option<PathBuf>,

        /// Player totals CSV destination
        #[arg(long)]
        players: Option<PathBuf>,
    },

    /// Delete a match and its whole event log
    Delete {
        /// Match id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut store = FileMatchStore::new(resolve_store_path(cli.store)?);

    match cli.command {
        Commands::New {
            opponent,
            venue,
            side,
            date,
        } => cmd_new(&mut store, opponent, venue, side, date),
        Commands::List => cmd_list(&store),
        Commands::Show { id } => cmd_show(&store, &id),
        Commands::Setup {
            id,
            half_minutes,
            max_number,
        } => cmd_setup(&mut store, &id, half_minutes, max_number),
        Commands::Panel { id, number, name } => cmd_panel(&mut store, &id, number, name),
        Commands::Log {
            id,
            event,
            team,
            clock,
            player,
        } => cmd_log(&mut store, &id, event, team, &clock, player),
        Commands::Undo { id } => cmd_undo(&mut store, &id),
        Commands::Export { id, events, players } => cmd_export(&store, &id, events, players),
        Commands::Delete { id } => cmd_delete(&mut store, &id),
    }
}

fn resolve_store_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::data_dir().context("no user data directory found; pass --store")?;
    Ok(base
        .join("gaa_stats")
        .join(format!("matches_v{}.json", SCHEMA_VERSION)))
}

fn load_match(store: &FileMatchStore, id: &str) -> Result<Match> {
    store
        .get(id)?
        .with_context(|| format!("match not found: {}", id))
}

/// Goals-points line the way it reads from the sideline, with the
/// two-pointers already folded into the points figure.
fn score_line(score: &Score) -> String {
    format!(
        "{}-{:02} ({} pts)",
        score.goals,
        score.points + score.two_points * 2,
        score.total_points
    )
}

fn cmd_new(
    store: &mut FileMatchStore,
    opponent: String,
    venue: String,
    side: Side,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let m = Match::new(opponent, venue, side, date);
    store.upsert(&m)?;

    println!("✅ Created {}", m.display_title());
    println!("   Id:    {}", m.id);
    println!("   Date:  {} ({})", m.match_date, m.side);
    println!("   Venue: {}", m.venue);
    Ok(())
}

fn cmd_list(store: &FileMatchStore) -> Result<()> {
    let matches = store.list()?;
    if matches.is_empty() {
        println!("No matches yet. Create one with `gaa_stats new --opponent <name>`.");
        return Ok(());
    }

    for m in matches {
        let score = score_from_events(&m.events);
        println!(
            "{}  {}  {:<28} {:>3} events  Balla {}",
            m.id,
            m.match_date,
            m.display_title(),
            m.events.len(),
            score_line(&score)
        );
    }
    Ok(())
}

fn cmd_show(store: &FileMatchStore, id: &str) -> Result<()> {
    let m = load_match(store, id)?;
    let score = score_from_events(&m.events);

    println!("{}", m.display_title());
    println!("   Date:   {} ({}, {})", m.match_date, m.side, m.venue);
    println!(
        "   Halves: {} min, panel to #{}",
        m.half_minutes, m.max_number
    );
    println!("   Score:  Balla {}", score_line(&score));

    let totals = team_totals(&m.events);
    for group in EVENT_GROUPS {
        let mut parts = Vec::new();
        for event_type in group.types {
            if let Some(count) = totals.get(event_type) {
                parts.push(format!("{} {}", event_type.label(), count));
            }
        }
        if !parts.is_empty() {
            println!("   {}: {}", group.title, parts.join(", "));
        }
    }

    if !m.panel.is_empty() {
        let named: Vec<String> = m
            .panel
            .iter()
            .map(|(number, name)| {
                if name.is_empty() {
                    format!("#{}", number)
                } else {
                    format!("#{} {}", number, name)
                }
            })
            .collect();
        println!("   Panel:  {}", named.join(", "));
    }

    if !m.events.is_empty() {
        let mut events: Vec<&MatchEvent> = m.events.iter().collect();
        events.sort_by_key(|event| event.ts);

        println!("   Recent:");
        for event in events.iter().rev().take(10) {
            let player = event
                .player_number
                .map(|n| format!("  #{}", n))
                .unwrap_or_default();
            println!(
                "     {}  {:<5} {}{}",
                format_clock(event.clock_seconds),
                event.team,
                event.event_type.label(),
                player
            );
        }
    }
    Ok(())
}

fn cmd_setup(
    store: &mut FileMatchStore,
    id: &str,
    half_minutes: Option<u16>,
    max_number: Option<u8>,
) -> Result<()> {
    let mut m = load_match(store, id)?;
    if let Some(minutes) = half_minutes {
        m.half_minutes = minutes;
    }
    if let Some(number) = max_number {
        m.max_number = number;
    }
    store.upsert(&m)?;

    println!(
        "✅ Setup saved: {} minute halves, panel to #{}",
        m.half_minutes, m.max_number
    );
    Ok(())
}

fn cmd_panel(
    store: &mut FileMatchStore,
    id: &str,
    number: u8,
    name: Option<String>,
) -> Result<()> {
    let mut m = load_match(store, id)?;
    match name {
        Some(name) => {
            if name.is_empty() {
                println!("✅ Panel #{} added (unnamed)", number);
            } else {
                println!("✅ Panel #{}: {}", number, name);
            }
            m.set_panel_name(number, name);
        }
        None => {
            m.remove_panel_entry(number);
            println!("✅ Panel #{} cleared", number);
        }
    }
    store.upsert(&m)?;
    Ok(())
}

fn cmd_log(
    store: &mut FileMatchStore,
    id: &str,
    event_type: EventType,
    team: EventTeam,
    clock: &str,
    player: Option<u8>,
) -> Result<()> {
    let mut m = load_match(store, id)?;
    let clock_seconds = parse_clock_arg(clock)?;
    let logged = m.append_event(team, event_type, clock_seconds, player);
    store.upsert(&m)?;

    let attribution = logged
        .player_number
        .map(|n| format!(" by #{}", n))
        .unwrap_or_default();
    println!(
        "✅ {} {}{} at {}",
        logged.team,
        logged.event_type.label(),
        attribution,
        format_clock(logged.clock_seconds)
    );
    println!("   Score: Balla {}", score_line(&score_from_events(&m.events)));
    Ok(())
}

/// Accepts a formatted clock ("02:10") or raw elapsed seconds ("130").
fn parse_clock_arg(input: &str) -> Result<u32> {
    if let Ok(seconds) = input.parse::<u32>() {
        return Ok(seconds);
    }
    Ok(parse_clock(input)?)
}

fn cmd_undo(store: &mut FileMatchStore, id: &str) -> Result<()> {
    let mut m = load_match(store, id)?;
    match m.undo_last() {
        Some(event) => {
            store.upsert(&m)?;
            println!(
                "✅ Undid {} {} at {}",
                event.team,
                event.event_type.label(),
                format_clock(event.clock_seconds)
            );
            println!("   Score: Balla {}", score_line(&score_from_events(&m.events)));
        }
        None => println!("Nothing to undo."),
    }
    Ok(())
}

fn cmd_export(
    store: &FileMatchStore,
    id: &str,
    events: Option<PathBuf>,
    players: Option<PathBuf>,
) -> Result<()> {
    if events.is_none() && players.is_none() {
        bail!("nothing to export: pass --events and/or --players");
    }
    let m = load_match(store, id)?;

    if let Some(dest) = events {
        write_export(&dest, &events_csv(&m)?, "events")?;
    }
    if let Some(dest) = players {
        write_export(&dest, &player_totals_csv(&m)?, "player totals")?;
    }
    Ok(())
}

fn write_export(dest: &Path, text: &str, kind: &str) -> Result<()> {
    if dest == Path::new("-") {
        println!("{}", text);
    } else {
        fs::write(dest, text).with_context(|| format!("writing {}", dest.display()))?;
        println!("✅ Wrote {} CSV to {}", kind, dest.display());
    }
    Ok(())
}

fn cmd_delete(store: &mut FileMatchStore, id: &str) -> Result<()> {
    let m = load_match(store, id)?;
    store.delete(&m.id)?;
    println!(
        "✅ Deleted {} ({} events)",
        m.display_title(),
        m.events.len()
    );
    Ok(())
}
