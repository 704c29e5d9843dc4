//! GameSession - the primary public API for gameplay.
//!
//! The session owns the canonical `GameState` and is the only way to
//! mutate it: every UI interaction is a transition method that either
//! fully commits or returns an `ActionError` with nothing changed.
//! User-visible happenings are reported as `GameEvent`s for the
//! notification surface to render; battle narration goes to the
//! encounter log.
//!
//! Time is cooperative: the caller feeds a monotone millisecond clock
//! into [`GameSession::tick`], which fires any deferred battle events
//! that have come due (monster retaliation, battle cleanup).

use crate::balance;
use crate::battle::{DeferredAction, Encounter, Phase, Scheduler, StrikeOutcome};
use crate::bestiary;
use crate::items;
use crate::quests;
use crate::spells::SpellKind;
use crate::world::{Attribute, EquipSlot, GameState, Item, ItemKind, Player, StatKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Errors from session transitions. Every failure is a local validation
/// check: state is untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Not enough mana: need {needed}, have {have}")]
    InsufficientMana { needed: u32, have: u32 },

    #[error("Not enough gold: need {needed}, have {have}")]
    InsufficientGold { needed: u32, have: u32 },

    #[error("No skill points available")]
    NoSkillPoints,

    #[error("No stat points available")]
    NoStatPoints,

    #[error("{0} is already at maximum level")]
    SkillMaxed(String),

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Unknown spell: {0}")]
    UnknownSpell(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown quest: {0}")]
    UnknownQuest(String),

    #[error("Unknown monster: {0}")]
    UnknownMonster(String),

    #[error("You already know the spell {0}")]
    SpellAlreadyKnown(String),

    #[error("You already own {0}")]
    AlreadyOwned(String),

    #[error("{0} cannot be used")]
    NotConsumable(String),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("Nothing is equipped in the {0} slot")]
    EmptySlot(EquipSlot),

    #[error("Quest is not completed yet")]
    QuestNotCompleted,

    #[error("Quest rewards were already claimed")]
    QuestAlreadyClaimed,

    #[error("No battle in progress")]
    NoEncounter,

    #[error("Already in a battle")]
    AlreadyInBattle,

    #[error("Waiting for the monster's turn")]
    NotPlayerTurn,

    #[error("The battle is already ending")]
    BattleEnding,

    #[error("You are in no state to fight")]
    PlayerIncapacitated,
}

/// User-visible happenings, consumed by the notification surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EncounterStarted {
        monster: String,
        level: u32,
    },
    MonsterDefeated {
        monster: String,
        level: u32,
        experience: u32,
        gold: u32,
        loot: Vec<String>,
    },
    PlayerDefeated {
        restored_health: u32,
    },
    FledBattle,
    LeveledUp {
        level: u32,
        skill_points: u32,
        stat_points: u32,
    },
    QuestCompleted {
        quest: String,
    },
    QuestRewardsClaimed {
        quest: String,
        experience: u32,
        gold: u32,
        items: Vec<String>,
    },
    SkillLearned {
        skill: String,
    },
    SkillUpgraded {
        skill: String,
        level: u32,
    },
    SpellLearned {
        spell: String,
    },
    ItemUsed {
        item: String,
    },
    ItemEquipped {
        item: String,
        slot: EquipSlot,
    },
    ItemUnequipped {
        item: String,
        slot: EquipSlot,
    },
    ItemSold {
        item: String,
        gold: u32,
    },
    ItemPurchased {
        item: String,
        gold: u32,
    },
    ShopRestocked,
    MonstersRefreshed,
}

/// A running game session.
pub struct GameSession {
    state: GameState,
    encounter: Option<Encounter>,
    scheduler: Scheduler,
    shop: Vec<Item>,
    events: Vec<GameEvent>,
    rng: StdRng,
    clock_ms: u64,
}

impl GameSession {
    /// Start a new game around a freshly created player.
    pub fn new_game(player: Player) -> Self {
        Self::new_game_with_rng(player, StdRng::from_entropy())
    }

    /// Start a new game with a specific RNG (useful for testing).
    pub fn new_game_with_rng(player: Player, mut rng: StdRng) -> Self {
        let monsters =
            bestiary::generate_monsters(balance::ENCOUNTER_POOL_SIZE, player.level, &mut rng);
        let state = GameState {
            clicks: 0,
            click_power: 1,
            auto_click_power: 0,
            player,
            monsters,
            quests: quests::all_quests(),
            available_skills: crate::skills::all_skills(),
            available_spells: crate::spells::all_spells(),
        };
        Self::resume_with_rng(state, rng)
    }

    /// Resume a session from a loaded snapshot.
    pub fn resume(state: GameState) -> Self {
        Self::resume_with_rng(state, StdRng::from_entropy())
    }

    /// Resume with a specific RNG (useful for testing).
    pub fn resume_with_rng(mut state: GameState, mut rng: StdRng) -> Self {
        state.normalize();
        let shop = items::shop_stock(&mut rng);
        Self {
            state,
            encounter: None,
            scheduler: Scheduler::new(),
            shop,
            events: Vec::new(),
            rng,
            clock_ms: 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get a mutable reference to the game state.
    ///
    /// Use with caution - direct modifications bypass the transition
    /// methods and their validation.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    /// Current effective combat stats.
    pub fn effective_stats(&self) -> crate::world::EffectiveStats {
        self.state.player.effective_stats()
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn in_battle(&self) -> bool {
        self.encounter.is_some()
    }

    /// The battle log of the running encounter, if any.
    pub fn battle_log(&self) -> Option<&[String]> {
        self.encounter.as_ref().map(|enc| enc.log.as_slice())
    }

    pub fn shop(&self) -> &[Item] {
        &self.shop
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Idle loop
    // ------------------------------------------------------------------

    /// A manual click: clicks and gold both grow by the click power.
    pub fn click(&mut self) {
        self.state.clicks += self.state.click_power as u64;
        self.state.player.gold += self.state.click_power;
    }

    /// One auto-clicker pulse. Auto-clicks accumulate clicks only.
    pub fn auto_click_tick(&mut self) {
        self.state.clicks += self.state.auto_click_power as u64;
    }

    // ------------------------------------------------------------------
    // Progression
    // ------------------------------------------------------------------

    /// Funnel for every experience grant; resolves level-ups, refreshing
    /// the encounter pool when one lands.
    fn grant_experience(&mut self, amount: u32) {
        let gained = self.state.player.grant_experience(amount);
        if gained > 0 {
            tracing::info!(
                level = self.state.player.level,
                gained,
                "player leveled up"
            );
            self.events.push(GameEvent::LeveledUp {
                level: self.state.player.level,
                skill_points: gained * balance::SKILL_POINTS_PER_LEVEL,
                stat_points: gained * balance::STAT_POINTS_PER_LEVEL,
            });
            self.regenerate_monsters();
        }
    }

    /// Learn a skill from the available pool.
    pub fn learn_skill(&mut self, skill_id: &str) -> Result<(), ActionError> {
        let index = self
            .state
            .available_skills
            .iter()
            .position(|skill| skill.id == skill_id)
            .ok_or_else(|| ActionError::UnknownSkill(skill_id.to_string()))?;

        let cost = self.state.available_skills[index].cost;
        if self.state.player.skill_points < cost {
            return Err(ActionError::NoSkillPoints);
        }

        let mut skill = self.state.available_skills.remove(index);
        skill.level = 1;
        self.state.player.skill_points -= cost;
        self.events.push(GameEvent::SkillLearned {
            skill: skill.name.clone(),
        });
        self.state.player.skills.push(skill);
        Ok(())
    }

    /// Raise a learned skill by one level.
    pub fn upgrade_skill(&mut self, skill_id: &str) -> Result<(), ActionError> {
        let skill = self
            .state
            .player
            .skills
            .iter_mut()
            .find(|skill| skill.id == skill_id)
            .ok_or_else(|| ActionError::UnknownSkill(skill_id.to_string()))?;

        if skill.level >= skill.max_level {
            return Err(ActionError::SkillMaxed(skill.name.clone()));
        }
        let cost = skill.cost;
        if self.state.player.skill_points < cost {
            return Err(ActionError::NoSkillPoints);
        }

        skill.level += 1;
        let event = GameEvent::SkillUpgraded {
            skill: skill.name.clone(),
            level: skill.level,
        };
        self.state.player.skill_points -= cost;
        self.events.push(event);
        Ok(())
    }

    /// Spend one stat point on an attribute.
    pub fn spend_stat_point(&mut self, attribute: Attribute) -> Result<(), ActionError> {
        if self.state.player.stat_points == 0 {
            return Err(ActionError::NoStatPoints);
        }
        self.state.player.stat_points -= 1;
        let current = self.state.player.attributes.get(attribute);
        self.state.player.attributes.set(attribute, current + 1);
        Ok(())
    }

    /// Learn a spell from the available pool.
    pub fn learn_spell(&mut self, spell_id: &str) -> Result<(), ActionError> {
        let spell = self
            .state
            .available_spells
            .iter()
            .find(|spell| spell.id == spell_id)
            .ok_or_else(|| ActionError::UnknownSpell(spell_id.to_string()))?;

        if self.state.player.knows_spell(spell_id) {
            return Err(ActionError::SpellAlreadyKnown(spell.name.clone()));
        }

        let mut learned = spell.clone();
        learned.learned = true;
        self.events.push(GameEvent::SpellLearned {
            spell: learned.name.clone(),
        });
        self.state.player.spells.push(learned);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inventory and equipment
    // ------------------------------------------------------------------

    /// Use an inventory item by position: drink a consumable or learn a
    /// scroll's spell. The item is consumed on success.
    pub fn use_item(&mut self, index: usize) -> Result<(), ActionError> {
        let item = self
            .state
            .player
            .inventory
            .get(index)
            .cloned()
            .ok_or_else(|| ActionError::UnknownItem(format!("inventory slot {index}")))?;

        match item.kind {
            ItemKind::Consumable => {
                let effect = item
                    .effect
                    .ok_or_else(|| ActionError::NotConsumable(item.name.clone()))?;
                match effect.kind {
                    StatKind::Health => {
                        let max = self.state.player.stats.max_health;
                        self.state.player.heal(effect.amount, max);
                    }
                    StatKind::Mana => {
                        let max = self.state.player.stats.max_mana;
                        self.state.player.restore_mana(effect.amount, max);
                    }
                    StatKind::Attack | StatKind::Defense => {
                        return Err(ActionError::NotConsumable(item.name.clone()));
                    }
                }
            }
            ItemKind::Scroll => {
                let spell_id = item
                    .spell_id
                    .clone()
                    .ok_or_else(|| ActionError::NotConsumable(item.name.clone()))?;
                // The scroll survives a failed learn attempt.
                self.learn_spell(&spell_id)?;
            }
            _ => return Err(ActionError::NotConsumable(item.name.clone())),
        }

        self.state.player.inventory.remove(index);
        self.events.push(GameEvent::ItemUsed { item: item.name });
        Ok(())
    }

    /// Equip an inventory item by position, swapping out whatever was in
    /// its slot.
    pub fn equip(&mut self, index: usize) -> Result<(), ActionError> {
        let item = self
            .state
            .player
            .inventory
            .get(index)
            .ok_or_else(|| ActionError::UnknownItem(format!("inventory slot {index}")))?;
        let slot = item
            .equip_slot
            .ok_or_else(|| ActionError::NotEquippable(item.name.clone()))?;

        let item = self.state.player.inventory.remove(index);
        let name = item.name.clone();
        let previous = self.state.player.equipment.swap(slot, Some(item));
        if let Some(previous) = previous {
            self.state.player.inventory.push(previous);
        }
        self.state.player.clamp_resources();
        self.events.push(GameEvent::ItemEquipped { item: name, slot });
        Ok(())
    }

    /// Unequip a slot back into the inventory.
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<(), ActionError> {
        let item = self
            .state
            .player
            .equipment
            .swap(slot, None)
            .ok_or(ActionError::EmptySlot(slot))?;
        let name = item.name.clone();
        self.state.player.inventory.push(item);
        self.state.player.clamp_resources();
        self.events
            .push(GameEvent::ItemUnequipped { item: name, slot });
        Ok(())
    }

    /// Sell an inventory item by position for its value.
    pub fn sell(&mut self, index: usize) -> Result<(), ActionError> {
        if index >= self.state.player.inventory.len() {
            return Err(ActionError::UnknownItem(format!("inventory slot {index}")));
        }
        let item = self.state.player.inventory.remove(index);
        self.state.player.gold += item.value;
        self.events.push(GameEvent::ItemSold {
            item: item.name,
            gold: item.value,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shop
    // ------------------------------------------------------------------

    /// Replace the shop's stock with a fresh random draw.
    pub fn restock_shop(&mut self) {
        self.shop = items::shop_stock(&mut self.rng);
        self.events.push(GameEvent::ShopRestocked);
    }

    /// Buy an item from the shop.
    pub fn buy(&mut self, item_id: &str) -> Result<(), ActionError> {
        let item = self
            .shop
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;

        let price = item.price.unwrap_or(0);
        if self.state.player.gold < price {
            return Err(ActionError::InsufficientGold {
                needed: price,
                have: self.state.player.gold,
            });
        }
        if self.state.player.owns_item(&item.id) {
            return Err(ActionError::AlreadyOwned(item.name.clone()));
        }
        if item.kind == ItemKind::Scroll {
            if let Some(spell_id) = &item.spell_id {
                if self.state.player.knows_spell(spell_id) {
                    return Err(ActionError::SpellAlreadyKnown(item.name.clone()));
                }
            }
        }

        self.state.player.gold -= price;
        self.events.push(GameEvent::ItemPurchased {
            item: item.name.clone(),
            gold: price,
        });
        self.state.player.inventory.push(item);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    /// Claim a completed quest's rewards. Valid exactly once.
    pub fn claim_quest(&mut self, quest_id: &str) -> Result<(), ActionError> {
        let quest = self
            .state
            .quests
            .iter_mut()
            .find(|quest| quest.id == quest_id)
            .ok_or_else(|| ActionError::UnknownQuest(quest_id.to_string()))?;

        if !quest.completed {
            return Err(ActionError::QuestNotCompleted);
        }
        if quest.claimed {
            return Err(ActionError::QuestAlreadyClaimed);
        }

        quest.claimed = true;
        let name = quest.name.clone();
        let rewards = quest.rewards.clone();

        self.state.player.gold += rewards.gold;
        self.state
            .player
            .inventory
            .extend(rewards.items.iter().cloned());
        self.events.push(GameEvent::QuestRewardsClaimed {
            quest: name,
            experience: rewards.experience,
            gold: rewards.gold,
            items: rewards.items.iter().map(|item| item.name.clone()).collect(),
        });
        self.grant_experience(balance::scaled_experience(rewards.experience));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Monsters and battle
    // ------------------------------------------------------------------

    /// Refresh the encounter pool with monsters scaled to the player.
    pub fn refresh_monsters(&mut self) {
        self.regenerate_monsters();
    }

    fn regenerate_monsters(&mut self) {
        self.state.monsters = bestiary::generate_monsters(
            balance::ENCOUNTER_POOL_SIZE,
            self.state.player.level,
            &mut self.rng,
        );
        self.events.push(GameEvent::MonstersRefreshed);
    }

    /// Engage a monster from the encounter pool.
    pub fn engage(&mut self, monster_id: &str) -> Result<(), ActionError> {
        if self.encounter.is_some() {
            return Err(ActionError::AlreadyInBattle);
        }
        if self.state.player.stats.health == 0 {
            return Err(ActionError::PlayerIncapacitated);
        }
        let monster = self
            .state
            .monsters
            .iter()
            .find(|monster| monster.id == monster_id)
            .cloned()
            .ok_or_else(|| ActionError::UnknownMonster(monster_id.to_string()))?;

        tracing::debug!(monster = %monster.name, level = monster.level, "engaging");
        self.events.push(GameEvent::EncounterStarted {
            monster: monster.name.clone(),
            level: monster.level,
        });
        self.encounter = Some(Encounter::new(monster));
        Ok(())
    }

    /// Borrow the encounter if the player may act right now.
    fn player_turn(&mut self) -> Result<&mut Encounter, ActionError> {
        let encounter = self.encounter.as_mut().ok_or(ActionError::NoEncounter)?;
        match encounter.phase {
            Phase::Ending => Err(ActionError::BattleEnding),
            Phase::MonsterTurn => Err(ActionError::NotPlayerTurn),
            Phase::PlayerTurn => Ok(encounter),
        }
    }

    /// A plain attack.
    pub fn attack(&mut self) -> Result<(), ActionError> {
        let eff = self.state.player.effective_stats();
        let outcome = self.player_turn()?.player_attack(&eff);
        self.after_strike(outcome);
        Ok(())
    }

    /// Take a defensive stance for the monster's next strike.
    pub fn defend(&mut self) -> Result<(), ActionError> {
        self.player_turn()?.defend();
        self.schedule_monster_turn();
        Ok(())
    }

    /// Use a learned skill as a strike. Costs a flat 10 mana, deducted
    /// only when the strike actually happens.
    pub fn use_skill(&mut self, skill_id: &str) -> Result<(), ActionError> {
        let eff = self.state.player.effective_stats();
        let skill = self
            .state
            .player
            .skills
            .iter()
            .find(|skill| skill.id == skill_id)
            .cloned()
            .ok_or_else(|| ActionError::UnknownSkill(skill_id.to_string()))?;

        let mana = self.state.player.stats.mana;
        if mana < balance::SKILL_MANA_COST {
            return Err(ActionError::InsufficientMana {
                needed: balance::SKILL_MANA_COST,
                have: mana,
            });
        }

        let outcome = self.player_turn()?.player_skill(&eff, &skill);
        self.state.player.spend_mana(balance::SKILL_MANA_COST);
        self.after_strike(outcome);
        Ok(())
    }

    /// Cast a learned spell.
    pub fn cast_spell(&mut self, spell_id: &str) -> Result<(), ActionError> {
        let eff = self.state.player.effective_stats();
        let spell = self
            .state
            .player
            .spells
            .iter()
            .find(|spell| spell.id == spell_id)
            .cloned()
            .ok_or_else(|| ActionError::UnknownSpell(spell_id.to_string()))?;

        let mana = self.state.player.stats.mana;
        if mana < spell.mana_cost {
            return Err(ActionError::InsufficientMana {
                needed: spell.mana_cost,
                have: mana,
            });
        }

        match spell.kind {
            SpellKind::Damage => {
                let outcome = self.player_turn()?.player_damage_spell(&spell);
                self.state.player.spend_mana(spell.mana_cost);
                self.after_strike(outcome);
            }
            SpellKind::Heal => {
                let encounter = self.player_turn()?;
                encounter.push_log(format!(
                    "You cast {} and heal yourself for {} health!",
                    spell.name, spell.power
                ));
                encounter.phase = Phase::MonsterTurn;
                encounter.defending = false;
                self.state.player.heal(spell.power, eff.max_health);
                self.state.player.spend_mana(spell.mana_cost);
                self.schedule_monster_turn();
            }
            SpellKind::Buff => {
                // Buffs are flavor only: a log line and the turn.
                let encounter = self.player_turn()?;
                encounter.push_log(format!(
                    "You cast {}, enhancing your abilities!",
                    spell.name
                ));
                encounter.phase = Phase::MonsterTurn;
                encounter.defending = false;
                self.state.player.spend_mana(spell.mana_cost);
                self.schedule_monster_turn();
            }
        }
        Ok(())
    }

    /// Try to run from the battle: even odds. Failure forfeits the turn.
    pub fn flee(&mut self) -> Result<(), ActionError> {
        let encounter = self.encounter.as_mut().ok_or(ActionError::NoEncounter)?;
        if encounter.phase == Phase::Ending {
            return Err(ActionError::BattleEnding);
        }

        let was_player_turn = encounter.phase == Phase::PlayerTurn;
        if encounter.flee(&mut self.rng) {
            let id = encounter.id;
            self.events.push(GameEvent::FledBattle);
            self.scheduler.cancel(id);
            self.scheduler.schedule(
                id,
                self.clock_ms + balance::FLEE_END_DELAY_MS,
                DeferredAction::ClearFlee,
            );
        } else if was_player_turn {
            // Forfeits the turn; if the monster was already due to act,
            // its pending strike stands.
            self.schedule_monster_turn();
        }
        Ok(())
    }

    /// Advance the session clock and fire any deferred battle events
    /// that have come due. Events belonging to an encounter that is no
    /// longer live are discarded.
    pub fn tick(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
        for event in self.scheduler.take_due(self.clock_ms) {
            let live = self.encounter.as_ref().map(|enc| enc.id);
            if live != Some(event.encounter) {
                tracing::debug!(action = ?event.action, "dropping stale battle event");
                continue;
            }
            match event.action {
                DeferredAction::MonsterStrike => self.fire_monster_strike(),
                DeferredAction::ClearVictory | DeferredAction::ClearFlee => {
                    self.scheduler.cancel(event.encounter);
                    self.encounter = None;
                }
                DeferredAction::ClearDefeat => {
                    self.scheduler.cancel(event.encounter);
                    self.encounter = None;
                    let restored = (self.state.player.effective_stats().max_health as f64
                        * balance::DEATH_HEALTH_RECOVERY)
                        as u32;
                    self.state.player.stats.health = restored;
                    self.events.push(GameEvent::PlayerDefeated {
                        restored_health: restored,
                    });
                }
            }
        }
    }

    fn schedule_monster_turn(&mut self) {
        if let Some(encounter) = &self.encounter {
            self.scheduler.schedule(
                encounter.id,
                self.clock_ms + balance::MONSTER_TURN_DELAY_MS,
                DeferredAction::MonsterStrike,
            );
        }
    }

    fn fire_monster_strike(&mut self) {
        let eff = self.state.player.effective_stats();
        let Some(encounter) = self.encounter.as_mut() else {
            return;
        };
        if encounter.phase != Phase::MonsterTurn {
            return;
        }

        let outcome = encounter.monster_retaliation(&mut self.state.player, &eff);
        if outcome.player_defeated {
            let id = encounter.id;
            self.scheduler.schedule(
                id,
                self.clock_ms + balance::BATTLE_END_DELAY_MS,
                DeferredAction::ClearDefeat,
            );
        }
    }

    /// Resolve the aftermath of a player strike: schedule the monster's
    /// turn, or pay out the victory.
    fn after_strike(&mut self, outcome: StrikeOutcome) {
        if !outcome.monster_defeated {
            self.schedule_monster_turn();
            return;
        }

        let Some(encounter) = self.encounter.as_mut() else {
            return;
        };
        let monster_id = encounter.monster.id.clone();
        let name = encounter.monster.name.clone();
        let level = encounter.monster.level;
        let experience = encounter.monster.experience;
        let gold = encounter.monster.gold;
        let loot = encounter.monster.loot.clone();

        let loot_names: Vec<String> = loot.iter().map(|item| item.name.clone()).collect();
        encounter.push_log(format!("You defeated the level {level} {name}!"));
        encounter.push_log(format!(
            "You gained {experience} experience and {gold} gold!"
        ));
        encounter.push_log(format!(
            "You found: {}",
            if loot_names.is_empty() {
                "nothing".to_string()
            } else {
                loot_names.join(", ")
            }
        ));
        let encounter_id = encounter.id;

        self.state.player.gold += gold;
        self.state.player.inventory.extend(loot);

        for quest_id in quests::record_monster_defeat(&mut self.state.quests, &monster_id) {
            if let Some(quest) = self.state.quests.iter().find(|quest| quest.id == quest_id) {
                self.events.push(GameEvent::QuestCompleted {
                    quest: quest.name.clone(),
                });
            }
        }

        self.events.push(GameEvent::MonsterDefeated {
            monster: name,
            level,
            experience,
            gold,
            loot: loot_names,
        });
        self.grant_experience(experience);

        self.scheduler.schedule(
            encounter_id,
            self.clock_ms + balance::BATTLE_END_DELAY_MS,
            DeferredAction::ClearVictory,
        );
    }
}
