//! Race and class definitions.
//!
//! Static character-creation content: each race and class carries a
//! modifier table over the base stats, flavor text, and (for classes)
//! the spells a fresh character starts with.

use crate::world::Attribute;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signed adjustments a race or class applies on top of base stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatModifiers {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

// ============================================================================
// Races
// ============================================================================

/// Playable races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Orc,
}

impl Race {
    pub fn name(&self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::Elf => "Elf",
            Race::Dwarf => "Dwarf",
            Race::Orc => "Orc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Race::Human => "Humans are versatile and adaptable, with balanced stats.",
            Race::Elf => "Elves are graceful and magical, with higher mana but lower health.",
            Race::Dwarf => "Dwarves are sturdy and resilient, with higher health and defense.",
            Race::Orc => "Orcs are powerful and fierce, with higher attack and health.",
        }
    }

    pub fn lore(&self) -> &'static str {
        match self {
            Race::Human => {
                "Humans are known for their adaptability and ambition. They can excel in \
                 any profession and are found in all corners of the world."
            }
            Race::Elf => {
                "Elves are an ancient race with deep connections to magic and nature. They \
                 live for centuries, giving them a long-term perspective on the world."
            }
            Race::Dwarf => {
                "Dwarves are a hardy folk who dwell in mountains and deep caves. They are \
                 master craftsmen and fierce warriors when defending their homes."
            }
            Race::Orc => {
                "Orcs are a tribal warrior race known for their physical prowess and battle \
                 tactics. They value strength and honor above all else."
            }
        }
    }

    pub fn modifiers(&self) -> StatModifiers {
        match self {
            Race::Human => StatModifiers {
                health: 10,
                mana: 0,
                attack: 2,
                defense: 2,
                strength: 1,
                dexterity: 1,
                constitution: 1,
                intelligence: 1,
                wisdom: 1,
                charisma: 1,
            },
            Race::Elf => StatModifiers {
                health: 0,
                mana: 25,
                attack: 1,
                defense: 0,
                strength: 0,
                dexterity: 2,
                constitution: 0,
                intelligence: 2,
                wisdom: 1,
                charisma: 1,
            },
            Race::Dwarf => StatModifiers {
                health: 25,
                mana: -10,
                attack: 0,
                defense: 3,
                strength: 2,
                dexterity: 0,
                constitution: 3,
                intelligence: 0,
                wisdom: 1,
                charisma: 0,
            },
            Race::Orc => StatModifiers {
                health: 15,
                mana: -15,
                attack: 5,
                defense: 0,
                strength: 3,
                dexterity: 0,
                constitution: 2,
                intelligence: 0,
                wisdom: 0,
                charisma: 0,
            },
        }
    }

    pub fn all() -> [Race; 4] {
        [Race::Human, Race::Elf, Race::Dwarf, Race::Orc]
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Race {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Race::Human),
            "elf" => Ok(Race::Elf),
            "dwarf" => Ok(Race::Dwarf),
            "orc" => Ok(Race::Orc),
            other => Err(format!("unknown race: {other}")),
        }
    }
}

// ============================================================================
// Classes
// ============================================================================

/// Playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Warrior,
    Ranger,
    Mage,
    Cleric,
}

impl Class {
    pub fn name(&self) -> &'static str {
        match self {
            Class::Warrior => "Warrior",
            Class::Ranger => "Ranger",
            Class::Mage => "Mage",
            Class::Cleric => "Cleric",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Class::Warrior => "Warriors excel in combat with high strength and constitution.",
            Class::Ranger => "Rangers are skilled in ranged combat with high dexterity.",
            Class::Mage => {
                "Mages harness arcane power with high intelligence and mana. Starts with \
                 Fireball and Frost Spike spells."
            }
            Class::Cleric => {
                "Clerics channel divine power with high wisdom and charisma. Starts with \
                 Heal spell."
            }
        }
    }

    pub fn lore(&self) -> &'static str {
        match self {
            Class::Warrior => {
                "Warriors are masters of combat, trained in the use of weapons and armor. \
                 They rely on physical strength and endurance to overcome challenges."
            }
            Class::Ranger => {
                "Rangers are wilderness experts who specialize in tracking, survival, and \
                 ranged combat. They often serve as scouts and hunters."
            }
            Class::Mage => {
                "Mages study the arcane arts, manipulating the elements and forces of \
                 nature. Their power comes from knowledge and understanding of magical theory."
            }
            Class::Cleric => {
                "Clerics are devoted servants of deities who channel divine power. They can \
                 heal wounds, protect allies, and smite enemies in the name of their faith."
            }
        }
    }

    pub fn modifiers(&self) -> StatModifiers {
        match self {
            Class::Warrior => StatModifiers {
                health: 20,
                mana: 0,
                attack: 3,
                defense: 2,
                strength: 5,
                dexterity: 0,
                constitution: 3,
                intelligence: 0,
                wisdom: 0,
                charisma: 0,
            },
            Class::Ranger => StatModifiers {
                health: 0,
                mana: 0,
                attack: 2,
                defense: 0,
                strength: 0,
                dexterity: 5,
                constitution: 0,
                intelligence: 0,
                wisdom: 2,
                charisma: 0,
            },
            Class::Mage => StatModifiers {
                health: 0,
                mana: 30,
                attack: 0,
                defense: 0,
                strength: 0,
                dexterity: 0,
                constitution: 0,
                intelligence: 5,
                wisdom: 2,
                charisma: 0,
            },
            Class::Cleric => StatModifiers {
                health: 0,
                mana: 20,
                attack: 0,
                defense: 1,
                strength: 0,
                dexterity: 0,
                constitution: 0,
                intelligence: 0,
                wisdom: 5,
                charisma: 3,
            },
        }
    }

    /// The attribute this class scales with.
    pub fn primary_attribute(&self) -> Attribute {
        match self {
            Class::Warrior => Attribute::Strength,
            Class::Ranger => Attribute::Dexterity,
            Class::Mage => Attribute::Intelligence,
            Class::Cleric => Attribute::Wisdom,
        }
    }

    /// Spell ids this class starts with.
    pub fn starting_spells(&self) -> &'static [&'static str] {
        match self {
            Class::Warrior => &[],
            Class::Ranger => &["hunters-mark"],
            Class::Mage => &["fireball", "frost"],
            Class::Cleric => &["heal"],
        }
    }

    pub fn all() -> [Class; 4] {
        [Class::Warrior, Class::Ranger, Class::Mage, Class::Cleric]
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Class {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warrior" => Ok(Class::Warrior),
            "ranger" => Ok(Class::Ranger),
            "mage" => Ok(Class::Mage),
            "cleric" => Ok(Class::Cleric),
            other => Err(format!("unknown class: {other}")),
        }
    }
}
