//! Match persistence.
//!
//! Storage is a dumb gateway: whole `Match` records in, whole records
//! out, keyed by id, newest insertion first. All aggregation stays in
//! [`crate::stats`]; nothing here inspects an event log.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileMatchStore;
pub use memory::InMemoryMatchStore;

use crate::models::Match;

/// Storage contract for match records.
///
/// Behind a trait so the medium can be swapped: file-backed for the
/// CLI, in-memory for tests and embedders.
pub trait MatchStore {
    /// Every stored match, most recent insertion first.
    fn list(&self) -> Result<Vec<Match>, StoreError>;

    /// One match by id. An absent id is a value, not an error.
    fn get(&self, id: &str) -> Result<Option<Match>, StoreError>;

    /// Insert or replace by id. A replaced match keeps its list
    /// position; a new one goes to the front.
    fn upsert(&mut self, m: &Match) -> Result<(), StoreError>;

    /// Remove by id. Removing an absent id is a no-op.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}
