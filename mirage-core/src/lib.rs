//! Idle RPG game engine.
//!
//! This crate provides:
//! - Character creation from races and classes
//! - Turn-based battles against level-scaled monsters
//! - Quests, skills, spells, equipment, and a shop
//! - Save-slot persistence with legacy-format normalization
//!
//! The UI owns nothing: [`GameSession`] holds the canonical state and
//! every interaction is one of its transition methods.
//!
//! # Quick Start
//!
//! ```no_run
//! use mirage_core::{CharacterBuilder, Class, GameSession, Race, SaveManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let player = CharacterBuilder::new()
//!         .name("Thorin")
//!         .race(Race::Dwarf)
//!         .class(Class::Warrior)
//!         .build()?;
//!
//!     let mut session = GameSession::new_game(player);
//!     let monster_id = session.state().monsters[0].id.clone();
//!     session.engage(&monster_id)?;
//!     session.attack()?;
//!
//!     let saves = SaveManager::new("saves");
//!     saves.save("slot one", session.state()).await?;
//!     Ok(())
//! }
//! ```

pub mod balance;
pub mod battle;
pub mod bestiary;
pub mod character_builder;
pub mod class_data;
pub mod items;
pub mod persist;
pub mod quests;
pub mod session;
pub mod skills;
pub mod spells;
pub mod world;

// Primary public API
pub use battle::{Encounter, EncounterId, Phase};
pub use bestiary::Monster;
pub use character_builder::{BuilderError, CharacterBuilder};
pub use class_data::{Class, Race};
pub use persist::{PersistError, SaveManager, SaveMetadata, SavedGame};
pub use quests::Quest;
pub use session::{ActionError, GameEvent, GameSession};
pub use skills::Skill;
pub use spells::{Spell, SpellKind};
pub use world::{
    Attribute, EffectiveStats, EquipSlot, GameState, Item, ItemKind, Player, StatKind,
};
