//! Character creation.
//!
//! Builds a fully-formed `Player` from a name, race, and class:
//! base stats plus race and class modifiers, starting equipment,
//! and the class's starting spells, with full health and mana.

use crate::balance;
use crate::class_data::{Class, Race, StatModifiers};
use crate::items;
use crate::spells;
use crate::world::{CombatStats, Equipment, Player, RpgAttributes};
use thiserror::Error;

/// Error from character building.
#[derive(Debug, Clone, Error)]
pub enum BuilderError {
    #[error("Character name is required")]
    MissingName,

    #[error("Race selection is required")]
    MissingRace,

    #[error("Class selection is required")]
    MissingClass,
}

/// Builder for creating new characters.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    race: Option<Race>,
    class: Option<Class>,
    background: Option<String>,
    alignment: Option<String>,
}

fn apply(base: u32, modifier: i32) -> u32 {
    (base as i64 + modifier as i64).max(0) as u32
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the character's race.
    pub fn race(mut self, race: Race) -> Self {
        self.race = Some(race);
        self
    }

    /// Set the character's class.
    pub fn class(mut self, class: Class) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the character's background.
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Set the character's alignment.
    pub fn alignment(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = Some(alignment.into());
        self
    }

    /// Build the character, returning an error if a required field is
    /// missing.
    pub fn build(self) -> Result<Player, BuilderError> {
        let name = self.name.filter(|n| !n.trim().is_empty());
        let name = name.ok_or(BuilderError::MissingName)?;
        let race = self.race.ok_or(BuilderError::MissingRace)?;
        let class = self.class.ok_or(BuilderError::MissingClass)?;

        let race_mods = race.modifiers();
        let class_mods = class.modifiers();
        let sum = |pick: fn(&StatModifiers) -> i32| pick(&race_mods) + pick(&class_mods);

        let max_health = apply(balance::BASE_HEALTH, sum(|m| m.health));
        let max_mana = apply(balance::BASE_MANA, sum(|m| m.mana));

        let attributes = RpgAttributes {
            strength: apply(balance::BASE_ATTRIBUTE_SCORE, sum(|m| m.strength)),
            dexterity: apply(balance::BASE_ATTRIBUTE_SCORE, sum(|m| m.dexterity)),
            constitution: apply(balance::BASE_ATTRIBUTE_SCORE, sum(|m| m.constitution)),
            intelligence: apply(balance::BASE_ATTRIBUTE_SCORE, sum(|m| m.intelligence)),
            wisdom: apply(balance::BASE_ATTRIBUTE_SCORE, sum(|m| m.wisdom)),
            charisma: apply(balance::BASE_ATTRIBUTE_SCORE, sum(|m| m.charisma)),
        };

        let starting_spells = class
            .starting_spells()
            .iter()
            .filter_map(|id| spells::get_spell(id))
            .map(|mut spell| {
                spell.learned = true;
                spell
            })
            .collect();

        Ok(Player {
            name,
            race,
            class,
            background: self.background,
            alignment: self.alignment,
            level: 1,
            experience: 0,
            experience_to_next_level: balance::BASE_EXPERIENCE_TO_NEXT_LEVEL,
            gold: balance::STARTING_GOLD,
            stats: CombatStats {
                // A new character starts at full health and mana.
                health: max_health,
                max_health,
                mana: max_mana,
                max_mana,
                attack: apply(balance::BASE_ATTACK, sum(|m| m.attack)),
                defense: apply(balance::BASE_DEFENSE, sum(|m| m.defense)),
            },
            attributes,
            inventory: items::starter_items(class),
            equipment: Equipment::default(),
            skills: Vec::new(),
            skill_points: balance::STARTING_SKILL_POINTS,
            spells: starting_spells,
            stat_points: 0,
        })
    }
}
