//! Core game state types.
//!
//! Contains the player record, attribute scores, combat stats, items,
//! equipment, and the whole-session `GameState` snapshot, plus the stat
//! aggregator that folds attributes, equipment, and skills into the
//! effective combat stats used everywhere in battle.

use crate::balance;
use crate::bestiary::Monster;
use crate::class_data::{Class, Race};
use crate::quests::Quest;
use crate::skills::Skill;
use crate::spells::Spell;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Stat bonuses
// ============================================================================

/// The four combat stats an item or skill can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Attack,
    Defense,
    Health,
    Mana,
}

impl StatKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::Health => "Health",
            StatKind::Mana => "Mana",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single additive stat contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    pub kind: StatKind,
    pub amount: u32,
}

impl StatBonus {
    pub fn new(kind: StatKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}

// ============================================================================
// RPG attributes
// ============================================================================

/// The six attribute scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Constitution => "Constitution",
            Attribute::Intelligence => "Intelligence",
            Attribute::Wisdom => "Wisdom",
            Attribute::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Attribute; 6] {
        [
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Constitution,
            Attribute::Intelligence,
            Attribute::Wisdom,
            Attribute::Charisma,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attribute scores container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpgAttributes {
    pub strength: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub intelligence: u32,
    pub wisdom: u32,
    pub charisma: u32,
}

impl RpgAttributes {
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u32) {
        match attribute {
            Attribute::Strength => self.strength = value,
            Attribute::Dexterity => self.dexterity = value,
            Attribute::Constitution => self.constitution = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Wisdom => self.wisdom = value,
            Attribute::Charisma => self.charisma = value,
        }
    }
}

impl Default for RpgAttributes {
    fn default() -> Self {
        let s = balance::BASE_ATTRIBUTE_SCORE;
        Self {
            strength: s,
            dexterity: s,
            constitution: s,
            intelligence: s,
            wisdom: s,
            charisma: s,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

/// Item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
    Material,
    Scroll,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapon",
            ItemKind::Armor => "Armor",
            ItemKind::Consumable => "Consumable",
            ItemKind::Material => "Material",
            ItemKind::Scroll => "Scroll",
        }
    }
}

/// The five equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Helmet,
    Boots,
    Accessory,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Armor => "Armor",
            EquipSlot::Helmet => "Helmet",
            EquipSlot::Boots => "Boots",
            EquipSlot::Accessory => "Accessory",
        }
    }

    pub fn all() -> [EquipSlot; 5] {
        [
            EquipSlot::Weapon,
            EquipSlot::Armor,
            EquipSlot::Helmet,
            EquipSlot::Boots,
            EquipSlot::Accessory,
        ]
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An item. Items are value objects: the same logical item may appear as
/// multiple independent copies in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    /// Gold received when sold.
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<StatBonus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equip_slot: Option<EquipSlot>,
    /// Gold cost in the shop; items without a price are not sold there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// For scrolls: the spell this item teaches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell_id: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ItemKind,
        value: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind,
            value,
            effect: None,
            equip_slot: None,
            price: None,
            spell_id: None,
        }
    }

    pub fn with_effect(mut self, kind: StatKind, amount: u32) -> Self {
        self.effect = Some(StatBonus::new(kind, amount));
        self
    }

    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.equip_slot = Some(slot);
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_spell(mut self, spell_id: impl Into<String>) -> Self {
        self.spell_id = Some(spell_id.into());
        self
    }
}

/// Worn equipment: at most one item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub helmet: Option<Item>,
    pub boots: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Helmet => self.helmet.as_ref(),
            EquipSlot::Boots => self.boots.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    /// Put an item into a slot, returning whatever was there before.
    pub fn swap(&mut self, slot: EquipSlot, item: Option<Item>) -> Option<Item> {
        let target = match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Helmet => &mut self.helmet,
            EquipSlot::Boots => &mut self.boots,
            EquipSlot::Accessory => &mut self.accessory,
        };
        std::mem::replace(target, item)
    }

    /// Iterate over currently equipped items.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        [
            self.weapon.as_ref(),
            self.armor.as_ref(),
            self.helmet.as_ref(),
            self.boots.as_ref(),
            self.accessory.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

// ============================================================================
// Combat stats
// ============================================================================

/// Base combat stats and resource pools, before any bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub defense: u32,
}

/// Combat stats after aggregating base + attributes + equipment + skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub max_mana: u32,
}

// ============================================================================
// Player
// ============================================================================

/// The player's persistent progression record. This is the single root of
/// mutable game state; everything else is read-only content or derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub race: Race,
    pub class: Class,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub gold: u32,
    pub stats: CombatStats,
    /// Older save formats predate attributes; missing scores load as the
    /// base value for every attribute.
    #[serde(default)]
    pub attributes: RpgAttributes,
    pub inventory: Vec<Item>,
    pub equipment: Equipment,
    pub skills: Vec<Skill>,
    pub skill_points: u32,
    pub spells: Vec<Spell>,
    #[serde(default)]
    pub stat_points: u32,
}

impl Player {
    /// Compute effective combat stats from base stats, attributes,
    /// equipment, and learned skills.
    ///
    /// All contributions are additive and applied in a fixed order:
    /// base, then attribute bonuses, then equipment, then skills.
    /// Pure: recomputed in full on every call, never cached.
    pub fn effective_stats(&self) -> EffectiveStats {
        let mut attack = self.stats.attack;
        let mut defense = self.stats.defense;
        let mut max_health = self.stats.max_health;
        let mut max_mana = self.stats.max_mana;

        // Attribute bonuses: strength and dexterity contribute one point
        // per full five score; constitution and intelligence two per point.
        attack += self.attributes.strength / 5;
        defense += self.attributes.dexterity / 5;
        max_health += self.attributes.constitution * 2;
        max_mana += self.attributes.intelligence * 2;

        for bonus in self
            .equipment
            .items()
            .filter_map(|item| item.effect)
            .chain(self.skills.iter().map(Skill::total_bonus))
        {
            match bonus.kind {
                StatKind::Attack => attack += bonus.amount,
                StatKind::Defense => defense += bonus.amount,
                StatKind::Health => max_health += bonus.amount,
                StatKind::Mana => max_mana += bonus.amount,
            }
        }

        EffectiveStats {
            attack,
            defense,
            max_health,
            max_mana,
        }
    }

    /// Restore health, capped at the given maximum.
    pub fn heal(&mut self, amount: u32, max: u32) {
        self.stats.health = (self.stats.health + amount).min(max);
    }

    /// Restore mana, capped at the given maximum.
    pub fn restore_mana(&mut self, amount: u32, max: u32) {
        self.stats.mana = (self.stats.mana + amount).min(max);
    }

    /// Take damage; health floors at zero. Returns true if this dropped
    /// the player to zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.stats.health = self.stats.health.saturating_sub(amount);
        self.stats.health == 0
    }

    /// Spend mana; floors at zero.
    pub fn spend_mana(&mut self, amount: u32) {
        self.stats.mana = self.stats.mana.saturating_sub(amount);
    }

    /// Re-clamp resources to the current effective maximums. Called after
    /// anything that can lower them (unequipping a health item, say), so
    /// that `health <= effective max health` holds at all times.
    pub fn clamp_resources(&mut self) {
        let eff = self.effective_stats();
        self.stats.health = self.stats.health.min(eff.max_health);
        self.stats.mana = self.stats.mana.min(eff.max_mana);
    }

    /// Whether the player knows a spell.
    pub fn knows_spell(&self, spell_id: &str) -> bool {
        self.spells.iter().any(|spell| spell.id == spell_id)
    }

    /// Whether the player owns an item, in inventory or equipped.
    pub fn owns_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|item| item.id == item_id)
            || self
                .equipment
                .items()
                .any(|item| item.id == item_id)
    }

    /// Grant experience and resolve any level-ups immediately. Each level
    /// carries the overflow into the next threshold; gains stop at the
    /// level cap. Returns the number of levels gained.
    pub fn grant_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;

        let mut gained = 0;
        while self.level < balance::MAX_LEVEL
            && self.experience >= self.experience_to_next_level
        {
            self.experience -= self.experience_to_next_level;
            self.experience_to_next_level = (self.experience_to_next_level as f64
                * balance::EXPERIENCE_LEVEL_MULTIPLIER)
                as u32;
            self.level += 1;
            self.skill_points += balance::SKILL_POINTS_PER_LEVEL;
            self.stat_points += balance::STAT_POINTS_PER_LEVEL;

            self.stats.max_health += balance::LEVEL_HEALTH_GAIN;
            self.stats.max_mana += balance::LEVEL_MANA_GAIN;
            self.stats.attack += balance::LEVEL_ATTACK_GAIN;
            self.stats.defense += balance::LEVEL_DEFENSE_GAIN;
            // Level-ups refill both pools.
            self.stats.health = self.stats.max_health;
            self.stats.mana = self.stats.max_mana;

            gained += 1;
        }
        gained
    }
}

// ============================================================================
// Game state snapshot
// ============================================================================

/// The whole-session state: everything that save/load serializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub clicks: u64,
    pub click_power: u32,
    pub auto_click_power: u32,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub quests: Vec<Quest>,
    pub available_skills: Vec<Skill>,
    #[serde(default)]
    pub available_spells: Vec<Spell>,
}

impl GameState {
    /// Repair a freshly deserialized snapshot.
    ///
    /// Older formats can arrive without attribute scores (serde defaults
    /// cover those), with a dead character, or without the spell pool.
    /// A character must never load dead: non-positive health or mana
    /// resets to the maximum.
    pub fn normalize(&mut self) {
        if self.player.stats.health == 0 {
            self.player.stats.health = self.player.stats.max_health;
        }
        if self.player.stats.mana == 0 {
            self.player.stats.mana = self.player.stats.max_mana;
        }
        if self.available_spells.is_empty() {
            self.available_spells = crate::spells::all_spells();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills;

    fn test_player() -> Player {
        crate::character_builder::CharacterBuilder::new()
            .name("Tester")
            .race(Race::Human)
            .class(Class::Warrior)
            .build()
            .unwrap()
    }

    #[test]
    fn test_effective_stats_are_deterministic_and_additive() {
        let player = test_player();
        let a = player.effective_stats();
        let b = player.effective_stats();
        assert_eq!(a, b);

        // All contributions are additive and non-negative.
        assert!(a.attack >= player.stats.attack);
        assert!(a.defense >= player.stats.defense);
        assert!(a.max_health >= player.stats.max_health);
        assert!(a.max_mana >= player.stats.max_mana);
    }

    #[test]
    fn test_attribute_bonuses() {
        let mut player = test_player();
        let before = player.effective_stats();

        player.attributes.strength += 5;
        player.attributes.constitution += 1;
        let after = player.effective_stats();

        assert_eq!(after.attack, before.attack + 1);
        assert_eq!(after.max_health, before.max_health + 2);
    }

    #[test]
    fn test_equipment_and_skill_bonuses_stack() {
        let mut player = test_player();
        let base = player.effective_stats();

        player.equipment.swap(
            EquipSlot::Accessory,
            Some(
                Item::new("health-amulet", "Health Amulet", "", ItemKind::Armor, 20)
                    .with_effect(StatKind::Health, 15)
                    .with_slot(EquipSlot::Accessory),
            ),
        );
        let mut skill = skills::get_skill("power-strike").unwrap();
        skill.level = 3;
        player.skills.push(skill);

        let eff = player.effective_stats();
        assert_eq!(eff.max_health, base.max_health + 15);
        assert_eq!(eff.attack, base.attack + 5 * 3);
    }

    #[test]
    fn test_clamp_resources_after_unequip() {
        let mut player = test_player();
        player.equipment.swap(
            EquipSlot::Accessory,
            Some(
                Item::new("health-amulet", "Health Amulet", "", ItemKind::Armor, 20)
                    .with_effect(StatKind::Health, 15)
                    .with_slot(EquipSlot::Accessory),
            ),
        );
        let max = player.effective_stats().max_health;
        player.stats.health = max;

        player.equipment.swap(EquipSlot::Accessory, None);
        player.clamp_resources();
        assert!(player.stats.health <= player.effective_stats().max_health);
    }

    #[test]
    fn test_grant_experience_levels_up_with_carry_over() {
        let mut player = test_player();
        let (hp, atk) = (player.stats.max_health, player.stats.attack);

        let gained = player.grant_experience(120);
        assert_eq!(gained, 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 20);
        assert_eq!(player.experience_to_next_level, 150);
        assert_eq!(player.stats.max_health, hp + balance::LEVEL_HEALTH_GAIN);
        assert_eq!(player.stats.attack, atk + balance::LEVEL_ATTACK_GAIN);
        assert_eq!(player.stats.health, player.stats.max_health);
    }

    #[test]
    fn test_grant_experience_resolves_multiple_levels() {
        let mut player = test_player();
        // 100 + 150 = 250 to reach level 3.
        let gained = player.grant_experience(260);
        assert_eq!(gained, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 10);
    }

    #[test]
    fn test_normalize_revives_dead_character() {
        let player = test_player();
        let mut state = GameState {
            clicks: 0,
            click_power: 1,
            auto_click_power: 0,
            player,
            monsters: vec![],
            quests: vec![],
            available_skills: vec![],
            available_spells: vec![],
        };
        state.player.stats.health = 0;
        state.player.stats.mana = 0;

        state.normalize();
        assert_eq!(state.player.stats.health, state.player.stats.max_health);
        assert_eq!(state.player.stats.mana, state.player.stats.max_mana);
        assert!(!state.available_spells.is_empty());
    }
}
