//! Monster templates and the encounter generator.
//!
//! Templates are immutable content; battles run against `Monster`
//! instances generated from them, scaled to the player's level.

use crate::balance;
use crate::items;
use crate::world::Item;
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// An immutable monster definition.
///
/// Template ids are single words: generated instance ids append a
/// timestamp and sequence index after a `-`, and quest tracking recovers
/// the template id as the prefix before the first `-`.
#[derive(Debug, Clone)]
pub struct MonsterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u32,
    pub gold: u32,
}

/// A battle-ready monster instance generated from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Unique instance id: `{template}-{epoch_secs}-{index}`.
    pub id: String,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Experience granted on defeat.
    pub experience: u32,
    /// Gold granted on defeat.
    pub gold: u32,
    /// Items granted on defeat.
    pub loot: Vec<Item>,
}

impl Monster {
    /// The template this instance was generated from.
    pub fn template_id(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}

lazy_static! {
    /// Base monster templates.
    pub static ref MONSTER_TEMPLATES: Vec<MonsterTemplate> = vec![
        MonsterTemplate {
            id: "slime",
            name: "Slime",
            level: 1,
            health: 20,
            max_health: 20,
            attack: 3,
            defense: 1,
            experience: 10,
            gold: 5,
        },
        MonsterTemplate {
            id: "goblin",
            name: "Goblin",
            level: 2,
            health: 35,
            max_health: 35,
            attack: 6,
            defense: 2,
            experience: 18,
            gold: 12,
        },
        MonsterTemplate {
            id: "wolf",
            name: "Wolf",
            level: 3,
            health: 45,
            max_health: 45,
            attack: 9,
            defense: 3,
            experience: 25,
            gold: 15,
        },
        MonsterTemplate {
            id: "skeleton",
            name: "Skeleton",
            level: 5,
            health: 70,
            max_health: 70,
            attack: 12,
            defense: 6,
            experience: 40,
            gold: 30,
        },
        MonsterTemplate {
            id: "orc",
            name: "Orc Raider",
            level: 8,
            health: 120,
            max_health: 120,
            attack: 18,
            defense: 9,
            experience: 70,
            gold: 55,
        },
    ];
}

/// Get a monster template by id.
pub fn get_template(id: &str) -> Option<&'static MonsterTemplate> {
    MONSTER_TEMPLATES.iter().find(|template| template.id == id)
}

/// The inclusive level window for monsters generated against a player
/// level.
pub fn level_window(player_level: u32) -> (u32, u32) {
    let min = player_level
        .saturating_sub(balance::MONSTER_LEVEL_BELOW)
        .max(1);
    let max = player_level + balance::MONSTER_LEVEL_ABOVE;
    (min, max)
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Instantiate a template at a generated level.
///
/// Each stat is scaled by the level ratio and rounded to nearest
/// independently; loot is rolled fresh from the template's drop table.
fn instantiate<R: Rng>(
    template: &MonsterTemplate,
    level: u32,
    stamp: u64,
    index: usize,
    rng: &mut R,
) -> Monster {
    let ratio = level as f64 / template.level as f64;
    let scale = |stat: u32| (stat as f64 * ratio).round() as u32;

    let elite = level as f64 > template.level as f64 * balance::ELITE_LEVEL_RATIO;
    let name = if elite {
        format!("Elite {}", template.name)
    } else {
        template.name.to_string()
    };

    Monster {
        id: format!("{}-{}-{}", template.id, stamp, index),
        name,
        level,
        health: scale(template.health),
        max_health: scale(template.max_health),
        attack: scale(template.attack),
        defense: scale(template.defense),
        experience: balance::scaled_experience(scale(template.experience)),
        gold: scale(template.gold),
        loot: items::roll_loot(template.id, rng),
    }
}

/// Generate `count` monsters scaled to the player's level.
///
/// Templates are drawn without repetition until the pool is exhausted,
/// then the pool resets, so small requests get maximal variety.
pub fn generate_monsters<R: Rng>(count: usize, player_level: u32, rng: &mut R) -> Vec<Monster> {
    let mut shuffled: Vec<&MonsterTemplate> = MONSTER_TEMPLATES.iter().collect();
    shuffled.shuffle(rng);

    let unique = count.min(shuffled.len());
    let mut used: HashSet<&str> = HashSet::new();
    let stamp = epoch_secs();
    let (min, max) = level_window(player_level);

    let mut monsters = Vec::with_capacity(count);
    for index in 0..count {
        if used.len() >= unique {
            used.clear();
        }
        let template = shuffled
            .iter()
            .find(|template| !used.contains(template.id))
            .copied()
            .unwrap_or(shuffled[0]);
        used.insert(template.id);

        let level = rng.gen_range(min..=max);
        monsters.push(instantiate(template, level, stamp, index, rng));
    }
    monsters
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_window() {
        assert_eq!(level_window(1), (1, 4));
        assert_eq!(level_window(2), (1, 5));
        assert_eq!(level_window(10), (8, 13));
    }

    #[test]
    fn test_generated_levels_stay_in_window() {
        let mut rng = StdRng::seed_from_u64(11);
        for player_level in [1, 3, 12] {
            let (min, max) = level_window(player_level);
            for monster in generate_monsters(20, player_level, &mut rng) {
                assert!(
                    (min..=max).contains(&monster.level),
                    "level {} outside [{min}, {max}]",
                    monster.level
                );
            }
        }
    }

    #[test]
    fn test_small_batches_have_distinct_origins() {
        let mut rng = StdRng::seed_from_u64(5);
        let count = MONSTER_TEMPLATES.len();
        let monsters = generate_monsters(count, 3, &mut rng);

        let mut origins: Vec<&str> = monsters.iter().map(Monster::template_id).collect();
        origins.sort_unstable();
        origins.dedup();
        assert_eq!(origins.len(), count);
    }

    #[test]
    fn test_instance_ids_unique_within_batch() {
        let mut rng = StdRng::seed_from_u64(9);
        let monsters = generate_monsters(12, 4, &mut rng);
        let mut ids: Vec<&str> = monsters.iter().map(|m| m.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_elite_prefix_follows_level_ratio() {
        let mut rng = StdRng::seed_from_u64(2);
        let goblin = get_template("goblin").unwrap();

        let normal = instantiate(goblin, 2, 0, 0, &mut rng);
        assert_eq!(normal.name, "Goblin");

        // Exactly 1.5x the template level is not elite; above it is.
        let edge = instantiate(goblin, 3, 0, 1, &mut rng);
        assert_eq!(edge.name, "Goblin");

        let elite = instantiate(goblin, 4, 0, 2, &mut rng);
        assert_eq!(elite.name, "Elite Goblin");
    }

    #[test]
    fn test_stats_scale_linearly_with_rounding() {
        let mut rng = StdRng::seed_from_u64(4);
        let template = get_template("wolf").unwrap();

        // Level 6 wolf: ratio 2.0, every stat doubles.
        let monster = instantiate(template, 6, 0, 0, &mut rng);
        assert_eq!(monster.health, 90);
        assert_eq!(monster.max_health, 90);
        assert_eq!(monster.attack, 18);
        assert_eq!(monster.defense, 6);
        assert_eq!(monster.experience, 50);
        assert_eq!(monster.gold, 30);

        // Level 4 wolf: ratio 4/3, rounded per stat.
        let monster = instantiate(template, 4, 0, 1, &mut rng);
        assert_eq!(monster.attack, 12);
        assert_eq!(monster.defense, 4);
        assert_eq!(monster.health, 60);
    }

    #[test]
    fn test_template_id_recovered_from_instance_id() {
        let mut rng = StdRng::seed_from_u64(6);
        let monsters = generate_monsters(8, 2, &mut rng);
        for monster in &monsters {
            assert!(get_template(monster.template_id()).is_some());
        }
    }
}
