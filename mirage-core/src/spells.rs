//! Spell definitions and lookup.
//!
//! Spells are learned from class starting lists or from scroll items.
//! In battle, damage spells hit the monster, heal spells restore the
//! player, and buff spells are flavor only.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a spell does when cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellKind {
    Damage,
    Heal,
    Buff,
}

impl SpellKind {
    pub fn name(&self) -> &'static str {
        match self {
            SpellKind::Damage => "Damage",
            SpellKind::Heal => "Heal",
            SpellKind::Buff => "Buff",
        }
    }
}

impl fmt::Display for SpellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A spell, either learnable (in the pool) or learned (on the player).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: SpellKind,
    pub power: u32,
    pub mana_cost: u32,
    pub learned: bool,
}

impl Spell {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: SpellKind,
        power: u32,
        mana_cost: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind,
            power,
            mana_cost,
            learned: false,
        }
    }
}

lazy_static! {
    /// All spells in the game.
    pub static ref SPELLS: Vec<Spell> = vec![
        Spell::new(
            "fireball",
            "Fireball",
            "Launches a ball of fire at the enemy, dealing moderate damage.",
            SpellKind::Damage,
            25,
            15,
        ),
        Spell::new(
            "frost",
            "Frost Spike",
            "Hurls a shard of ice that pierces the enemy.",
            SpellKind::Damage,
            18,
            12,
        ),
        Spell::new(
            "heal",
            "Heal",
            "Channels divine energy to mend your wounds.",
            SpellKind::Heal,
            30,
            12,
        ),
        Spell::new(
            "hunters-mark",
            "Hunter's Mark",
            "Marks your quarry, sharpening your focus on the hunt.",
            SpellKind::Buff,
            0,
            8,
        ),
    ];
}

/// Get a spell by id.
pub fn get_spell(id: &str) -> Option<Spell> {
    SPELLS.iter().find(|spell| spell.id == id).cloned()
}

/// The full spell pool, for seeding a new game's learnable list.
pub fn all_spells() -> Vec<Spell> {
    SPELLS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_data::Class;

    #[test]
    fn test_get_spell() {
        let fireball = get_spell("fireball").unwrap();
        assert_eq!(fireball.kind, SpellKind::Damage);
        assert_eq!(fireball.power, 25);
        assert_eq!(fireball.mana_cost, 15);
        assert!(!fireball.learned);

        assert!(get_spell("meteor").is_none());
    }

    #[test]
    fn test_every_class_starting_spell_exists() {
        for class in Class::all() {
            for id in class.starting_spells() {
                assert!(get_spell(id).is_some(), "missing starting spell {id}");
            }
        }
    }
}
