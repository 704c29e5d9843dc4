//! Save-slot persistence.
//!
//! Whole-state snapshots as JSON files, one per named slot, with a
//! preview block readable without deserializing the full snapshot.
//! At most three slots may coexist; saving over an existing name
//! overwrites it.

use crate::world::GameState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("All {max} save slots are in use; delete or overwrite one")]
    SlotLimit { max: usize },

    #[error("No save named {0}")]
    NoSuchSlot(String),
}

/// Current save file version.
const SAVE_VERSION: u32 = 1;

/// Maximum number of coexisting save slots.
pub const MAX_SAVE_SLOTS: usize = 3;

/// Get the current timestamp as epoch seconds.
fn timestamp_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Preview block for the save-slot list, readable without loading the
/// whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    /// Slot name the player chose.
    pub slot: String,

    /// Character name.
    pub character_name: String,

    /// Race name.
    pub race: String,

    /// Class name.
    pub class: String,

    /// Character level.
    pub level: u32,

    /// Gold on hand.
    pub gold: u32,

    /// When the save was created (epoch seconds).
    #[serde(default)]
    pub saved_at: String,
}

/// A saved game with all state needed to resume play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the save was created.
    pub saved_at: String,

    /// Preview block (duplicated fields for peek access).
    pub metadata: SaveMetadata,

    /// The complete game state.
    pub state: GameState,
}

impl SavedGame {
    /// Wrap a game state for saving under a slot name.
    pub fn new(slot: impl Into<String>, state: GameState) -> Self {
        let saved_at = timestamp_now();
        let metadata = SaveMetadata {
            slot: slot.into(),
            character_name: state.player.name.clone(),
            race: state.player.race.name().to_string(),
            class: state.player.class.name().to_string(),
            level: state.player.level,
            gold: state.player.gold,
            saved_at: saved_at.clone(),
        };
        Self {
            version: SAVE_VERSION,
            saved_at,
            metadata,
            state,
        }
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;

        if saved.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }

    /// Read a save file's preview block without deserializing the state.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<SaveMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        // Parse just enough to get the metadata.
        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: SaveMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

/// Information about one save slot.
#[derive(Debug, Clone)]
pub struct SaveInfo {
    /// Path to the save file.
    pub path: String,

    /// Preview metadata.
    pub metadata: SaveMetadata,
}

/// Manages the save directory and its slots.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(slot)))
    }

    /// List all save slots, sorted by most recent first.
    pub async fn list(&self) -> Result<Vec<SaveInfo>, PersistError> {
        let mut saves = Vec::new();

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await?;
            return Ok(saves);
        }

        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Ok(metadata) = SavedGame::peek_metadata(&path).await {
                    saves.push(SaveInfo {
                        path: path.to_string_lossy().to_string(),
                        metadata,
                    });
                }
            }
        }

        saves.sort_by(|a, b| b.metadata.saved_at.cmp(&a.metadata.saved_at));
        Ok(saves)
    }

    /// Save a snapshot under a slot name. A new name beyond the slot
    /// limit is rejected; an existing name is overwritten.
    pub async fn save(&self, slot: &str, state: &GameState) -> Result<(), PersistError> {
        let existing = self.list().await?;
        let overwriting = existing.iter().any(|save| save.metadata.slot == slot);
        if !overwriting && existing.len() >= MAX_SAVE_SLOTS {
            return Err(PersistError::SlotLimit {
                max: MAX_SAVE_SLOTS,
            });
        }

        tracing::debug!(slot, overwriting, "saving game");
        SavedGame::new(slot, state.clone())
            .save_json(self.slot_path(slot))
            .await
    }

    /// Load a slot's snapshot, normalizing legacy formats: missing
    /// attributes come back as defaults, and a dead character revives
    /// at full health and mana.
    pub async fn load(&self, slot: &str) -> Result<GameState, PersistError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(PersistError::NoSuchSlot(slot.to_string()));
        }
        let saved = SavedGame::load_json(path).await?;
        let mut state = saved.state;
        state.normalize();
        Ok(state)
    }

    /// Delete a save slot.
    pub async fn delete(&self, slot: &str) -> Result<(), PersistError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(PersistError::NoSuchSlot(slot.to_string()));
        }
        fs::remove_file(path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character_builder::CharacterBuilder;
    use crate::class_data::{Class, Race};
    use crate::session::GameSession;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_state() -> GameState {
        let player = CharacterBuilder::new()
            .name("Saver")
            .race(Race::Dwarf)
            .class(Class::Cleric)
            .build()
            .unwrap();
        GameSession::new_game_with_rng(player, StdRng::seed_from_u64(0))
            .state()
            .clone()
    }

    #[test]
    fn test_saved_game_metadata() {
        let saved = SavedGame::new("slot one", sample_state());
        assert_eq!(saved.version, SAVE_VERSION);
        assert_eq!(saved.metadata.slot, "slot one");
        assert_eq!(saved.metadata.character_name, "Saver");
        assert_eq!(saved.metadata.race, "Dwarf");
        assert_eq!(saved.metadata.class, "Cleric");
        assert_eq!(saved.metadata.level, 1);
    }

    #[test]
    fn test_sanitized_slot_paths() {
        let manager = SaveManager::new("/saves");
        let path = manager.slot_path("My Save!");
        assert!(path.to_string_lossy().ends_with("My_Save_.json"));
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let manager = SaveManager::new(dir.path());
        let state = sample_state();

        manager.save("main", &state).await.expect("save");
        let loaded = manager.load("main").await.expect("load");

        // Field-for-field equality survives the trip.
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_slot_limit_and_overwrite() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let manager = SaveManager::new(dir.path());
        let state = sample_state();

        manager.save("one", &state).await.expect("save one");
        manager.save("two", &state).await.expect("save two");
        manager.save("three", &state).await.expect("save three");

        // A fourth name is rejected...
        assert!(matches!(
            manager.save("four", &state).await,
            Err(PersistError::SlotLimit { max: 3 })
        ));

        // ...but overwriting an existing slot is fine.
        manager.save("two", &state).await.expect("overwrite two");
        assert_eq!(manager.list().await.expect("list").len(), 3);
    }

    #[tokio::test]
    async fn test_peek_and_list() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let manager = SaveManager::new(dir.path());
        let state = sample_state();

        manager.save("alpha", &state).await.expect("save");

        let metadata = SavedGame::peek_metadata(manager.slot_path("alpha"))
            .await
            .expect("peek");
        assert_eq!(metadata.character_name, "Saver");

        let saves = manager.list().await.expect("list");
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].metadata.slot, "alpha");
    }

    #[tokio::test]
    async fn test_delete_slot() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let manager = SaveManager::new(dir.path());
        let state = sample_state();

        manager.save("gone", &state).await.expect("save");
        manager.delete("gone").await.expect("delete");
        assert!(manager.list().await.expect("list").is_empty());
        assert!(matches!(
            manager.delete("gone").await,
            Err(PersistError::NoSuchSlot(_))
        ));
        assert!(matches!(
            manager.load("gone").await,
            Err(PersistError::NoSuchSlot(_))
        ));
    }

    #[tokio::test]
    async fn test_legacy_snapshot_normalizes_on_load() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let manager = SaveManager::new(dir.path());
        let state = sample_state();

        // Strip the fields an old save would lack and kill the character.
        let mut value = serde_json::to_value(SavedGame::new("old", state)).expect("to value");
        let player = &mut value["state"]["player"];
        player.as_object_mut().unwrap().remove("attributes");
        player.as_object_mut().unwrap().remove("stat_points");
        player["stats"]["health"] = 0.into();
        player["stats"]["mana"] = 0.into();
        value["state"]["available_spells"] = serde_json::Value::Array(vec![]);

        fs::write(
            manager.slot_path("old"),
            serde_json::to_string(&value).expect("to string"),
        )
        .await
        .expect("write");

        let loaded = manager.load("old").await.expect("load");
        assert_eq!(loaded.player.attributes, Default::default());
        assert_eq!(loaded.player.stat_points, 0);
        assert_eq!(loaded.player.stats.health, loaded.player.stats.max_health);
        assert_eq!(loaded.player.stats.mana, loaded.player.stats.max_mana);
        assert!(!loaded.available_spells.is_empty());
    }

    #[tokio::test]
    async fn test_version_mismatch_is_rejected() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let manager = SaveManager::new(dir.path());
        let state = sample_state();

        let mut value = serde_json::to_value(SavedGame::new("future", state)).expect("to value");
        value["version"] = 99.into();
        fs::write(
            manager.slot_path("future"),
            serde_json::to_string(&value).expect("to string"),
        )
        .await
        .expect("write");

        assert!(matches!(
            manager.load("future").await,
            Err(PersistError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }
}
