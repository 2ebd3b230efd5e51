use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::models::Match;

use super::{MatchStore, StoreError};

/// All matches in one JSON file.
///
/// The file holds a single array of match records, the same shape the
/// browser build of the tracker kept under its storage key, so a blob
/// copied out of either tool loads in the other. Writes replace the
/// whole file atomically (temp file, then rename).
pub struct FileMatchStore {
    path: PathBuf,
}

impl FileMatchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> Result<Vec<Match>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        // A blob that does not parse is treated as empty rather than
        // fatal: pitch-side logging must survive a corrupt store.
        match serde_json::from_slice(&data) {
            Ok(matches) => Ok(matches),
            Err(err) => {
                log::warn!("ignoring malformed store {:?}: {}", self.path, err);
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, matches: &[Match]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec(matches)?;

        // Atomic replace: write a temp file, then rename over the store.
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        log::debug!("saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

impl MatchStore for FileMatchStore {
    fn list(&self) -> Result<Vec<Match>, StoreError> {
        self.load_all()
    }

    fn get(&self, id: &str) -> Result<Option<Match>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|m| m.id == id))
    }

    fn upsert(&mut self, m: &Match) -> Result<(), StoreError> {
        let mut all = self.load_all()?;
        match all.iter_mut().find(|existing| existing.id == m.id) {
            Some(existing) => *existing = m.clone(),
            None => all.insert(0, m.clone()),
        }
        self.save_all(&all)?;

        log::info!("stored match {} ({} events)", m.id, m.events.len());
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut all = self.load_all()?;
        let before = all.len();
        all.retain(|m| m.id != id);
        if all.len() != before {
            self.save_all(&all)?;
            log::info!("deleted match {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::models::{EventTeam, EventType, Side};

    use super::*;

    fn fixture(opponent: &str) -> Match {
        Match::new(
            opponent,
            "Balla",
            Side::Home,
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        )
    }

    fn store_in(dir: &TempDir) -> FileMatchStore {
        FileMatchStore::new(dir.path().join("matches_v1.json"))
    }

    #[test]
    fn a_missing_file_lists_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.list().unwrap().is_empty());
        assert!(store.get("match_nope").unwrap().is_none());
    }

    #[test]
    fn matches_survive_a_round_trip_with_their_events() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let mut m = fixture("Knockmore");
        m.set_panel_name(13, "Durkan");
        m.append_event(EventTeam::Balla, EventType::Goal, 125, Some(13));
        m.append_event(EventTeam::Opp, EventType::Wide, 140, None);
        store.upsert(&m).unwrap();

        let loaded = store.get(&m.id).unwrap().unwrap();
        assert_eq!(loaded, m);
    }

    #[test]
    fn new_matches_list_newest_first_and_updates_keep_position() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let first = fixture("Knockmore");
        let second = fixture("Westport");
        store.upsert(&first).unwrap();
        store.upsert(&second).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        let mut updated = first.clone();
        updated.append_event(EventTeam::Balla, EventType::Point, 75, Some(11));
        store.upsert(&updated).unwrap();

        let after: Vec<String> = store.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(after, vec![second.id, first.id]);
        assert_eq!(store.get(&updated.id).unwrap().unwrap().events.len(), 1);
    }

    #[test]
    fn delete_removes_one_match_and_ignores_absent_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let keep = fixture("Knockmore");
        let gone = fixture("Westport");
        store.upsert(&keep).unwrap();
        store.upsert(&gone).unwrap();

        store.delete(&gone.id).unwrap();
        store.delete("match_never_existed").unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[test]
    fn a_malformed_file_is_treated_as_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matches_v1.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let mut store = FileMatchStore::new(&path);
        assert!(store.list().unwrap().is_empty());

        // And the next save starts fresh.
        let m = fixture("Ballinrobe");
        store.upsert(&m).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn saves_leave_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.upsert(&fixture("Knockmore")).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn missing_parent_directories_are_created_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("matches_v1.json");
        let mut store = FileMatchStore::new(&path);

        store.upsert(&fixture("Knockmore")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
