//! Quest definitions and progress tracking.
//!
//! Quests track parallel progress counters against their requirements.
//! Completion is one-way; rewards are claimed explicitly, exactly once.

use crate::items;
use crate::world::Item;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// What a quest requirement counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    Monster,
    Item,
}

/// One requirement of a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRequirement {
    pub kind: RequirementKind,
    /// Template id of the monster to defeat, or item id to collect.
    pub target_id: String,
    pub amount: u32,
}

/// What a completed quest pays out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRewards {
    pub experience: u32,
    pub gold: u32,
    pub items: Vec<Item>,
}

/// A quest with its live progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirements: Vec<QuestRequirement>,
    /// One counter per requirement, monotonically non-decreasing and
    /// capped at the requirement's amount.
    pub progress: Vec<u32>,
    pub rewards: QuestRewards,
    pub completed: bool,
    #[serde(default)]
    pub claimed: bool,
}

impl Quest {
    /// Whether the rewards can be claimed right now.
    pub fn can_claim(&self) -> bool {
        self.completed && !self.claimed
    }

    fn recompute_completed(&mut self) {
        // Completion never reverts.
        if self.completed {
            return;
        }
        self.completed = self
            .requirements
            .iter()
            .zip(&self.progress)
            .all(|(requirement, progress)| *progress >= requirement.amount);
    }
}

/// Advance monster-kill requirements for a defeated monster.
///
/// The monster's template id is the instance id's prefix before the
/// first `-`. Returns the ids of quests this defeat completed.
pub fn record_monster_defeat(quests: &mut [Quest], monster_instance_id: &str) -> Vec<String> {
    let template_id = monster_instance_id
        .split('-')
        .next()
        .unwrap_or(monster_instance_id);

    let mut newly_completed = Vec::new();
    for quest in quests.iter_mut() {
        if quest.completed {
            continue;
        }
        for (index, requirement) in quest.requirements.iter().enumerate() {
            if requirement.kind == RequirementKind::Monster && requirement.target_id == template_id
            {
                if let Some(progress) = quest.progress.get_mut(index) {
                    *progress = (*progress + 1).min(requirement.amount);
                }
            }
        }
        quest.recompute_completed();
        if quest.completed {
            newly_completed.push(quest.id.clone());
        }
    }
    newly_completed
}

lazy_static! {
    /// All quests in the game.
    pub static ref QUESTS: Vec<Quest> = vec![
        Quest {
            id: "quest1".to_string(),
            name: "Slime Extermination".to_string(),
            description: "Defeat 3 slimes that have been causing trouble.".to_string(),
            requirements: vec![QuestRequirement {
                kind: RequirementKind::Monster,
                target_id: "slime".to_string(),
                amount: 3,
            }],
            progress: vec![0],
            rewards: QuestRewards {
                experience: 50,
                gold: 20,
                items: items::get_item("health-potion").into_iter().collect(),
            },
            completed: false,
            claimed: false,
        },
        Quest {
            id: "quest2".to_string(),
            name: "Goblin Menace".to_string(),
            description: "Drive off the goblins raiding the outlying farms.".to_string(),
            requirements: vec![QuestRequirement {
                kind: RequirementKind::Monster,
                target_id: "goblin".to_string(),
                amount: 5,
            }],
            progress: vec![0],
            rewards: QuestRewards {
                experience: 120,
                gold: 60,
                items: items::get_item("iron-sword").into_iter().collect(),
            },
            completed: false,
            claimed: false,
        },
        Quest {
            id: "quest3".to_string(),
            name: "Wolves at the Gate".to_string(),
            description: "Thin the wolf pack stalking the trade road.".to_string(),
            requirements: vec![QuestRequirement {
                kind: RequirementKind::Monster,
                target_id: "wolf".to_string(),
                amount: 4,
            }],
            progress: vec![0],
            rewards: QuestRewards {
                experience: 90,
                gold: 45,
                items: items::get_item("leather-armor").into_iter().collect(),
            },
            completed: false,
            claimed: false,
        },
        Quest {
            id: "quest4".to_string(),
            name: "Restless Bones".to_string(),
            description: "Lay the skeletons in the old crypt to rest.".to_string(),
            requirements: vec![QuestRequirement {
                kind: RequirementKind::Monster,
                target_id: "skeleton".to_string(),
                amount: 3,
            }],
            progress: vec![0],
            rewards: QuestRewards {
                experience: 150,
                gold: 80,
                items: items::get_item("mana-ring").into_iter().collect(),
            },
            completed: false,
            claimed: false,
        },
    ];
}

/// The full quest list, for seeding a new game.
pub fn all_quests() -> Vec<Quest> {
    QUESTS.clone()
}

/// Get a quest definition by id.
pub fn get_quest(id: &str) -> Option<Quest> {
    QUESTS.iter().find(|quest| quest.id == id).cloned()
}
