//! Skill definitions and lookup.
//!
//! Skills are passive stat boosts bought with skill points and upgraded
//! level by level. Attack-kind skills additionally add their bonus to
//! skill strikes in battle.

use crate::world::{StatBonus, StatKind};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A learnable skill. Catalog entries sit at level 0; learning one puts
/// a level-1 copy on the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub level: u32,
    pub max_level: u32,
    /// Bonus granted per skill level.
    pub effect: StatBonus,
    /// Skill point cost to learn.
    pub cost: u32,
}

impl Skill {
    /// The skill's current total contribution.
    pub fn total_bonus(&self) -> StatBonus {
        StatBonus::new(self.effect.kind, self.effect.amount * self.level)
    }
}

lazy_static! {
    /// Skills available for learning.
    pub static ref SKILLS: Vec<Skill> = vec![
        Skill {
            id: "power-strike".to_string(),
            name: "Power Strike".to_string(),
            description: "Increases attack power by 5 per level.".to_string(),
            level: 0,
            max_level: 5,
            effect: StatBonus::new(StatKind::Attack, 5),
            cost: 1,
        },
        Skill {
            id: "tough-skin".to_string(),
            name: "Tough Skin".to_string(),
            description: "Increases defense by 3 per level.".to_string(),
            level: 0,
            max_level: 5,
            effect: StatBonus::new(StatKind::Defense, 3),
            cost: 1,
        },
        Skill {
            id: "vitality".to_string(),
            name: "Vitality".to_string(),
            description: "Increases maximum health by 20 per level.".to_string(),
            level: 0,
            max_level: 5,
            effect: StatBonus::new(StatKind::Health, 20),
            cost: 1,
        },
        Skill {
            id: "clarity".to_string(),
            name: "Clarity".to_string(),
            description: "Increases maximum mana by 10 per level.".to_string(),
            level: 0,
            max_level: 5,
            effect: StatBonus::new(StatKind::Mana, 10),
            cost: 1,
        },
    ];
}

/// Get a skill by id.
pub fn get_skill(id: &str) -> Option<Skill> {
    SKILLS.iter().find(|skill| skill.id == id).cloned()
}

/// The full skill pool, for seeding a new game's learnable list.
pub fn all_skills() -> Vec<Skill> {
    SKILLS.clone()
}
