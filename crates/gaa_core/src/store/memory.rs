use crate::models::Match;

use super::{MatchStore, StoreError};

/// In-memory store with the file adapter's exact ordering semantics
/// and no I/O. Used by tests and embedders that manage persistence
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatchStore {
    matches: Vec<Match>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn list(&self) -> Result<Vec<Match>, StoreError> {
        Ok(self.matches.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Match>, StoreError> {
        Ok(self.matches.iter().find(|m| m.id == id).cloned())
    }

    fn upsert(&mut self, m: &Match) -> Result<(), StoreError> {
        match self.matches.iter_mut().find(|existing| existing.id == m.id) {
            Some(existing) => *existing = m.clone(),
            None => self.matches.insert(0, m.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.matches.retain(|m| m.id != id);
        Ok(())
    }
}
