//! Battle resolution.
//!
//! An `Encounter` is one battle from engagement to its terminal
//! resolution: a battle-local monster copy, the turn phase, the defend
//! flag, and the battle log. Monster retaliation and battle cleanup do
//! not happen inline; they are pushed onto the `Scheduler` as deferred
//! events keyed by encounter id, so an event from an abandoned
//! encounter can never touch a later one.

use crate::balance;
use crate::bestiary::Monster;
use crate::skills::Skill;
use crate::spells::Spell;
use crate::world::{EffectiveStats, Player, StatKind};
use rand::Rng;
use uuid::Uuid;

/// Unique identifier for one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncounterId(pub Uuid);

impl EncounterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EncounterId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the battle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a player action.
    PlayerTurn,
    /// The monster's retaliation is scheduled.
    MonsterTurn,
    /// A terminal transition (victory, defeat, or flee) is pending
    /// cleanup. Every player action is ignored in this phase.
    Ending,
}

/// Damage dealt by an attack: attack minus defense, never below 1.
pub fn attack_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(1)
}

/// Damage taken while defending: halved (rounded down), never below 1.
pub fn defended_damage(damage: u32) -> u32 {
    (damage / 2).max(1)
}

/// Outcome of a player strike against the monster.
#[derive(Debug, Clone, Copy)]
pub struct StrikeOutcome {
    pub damage: u32,
    pub monster_defeated: bool,
}

/// Outcome of the monster's retaliation.
#[derive(Debug, Clone, Copy)]
pub struct RetaliationOutcome {
    pub damage: u32,
    pub player_defeated: bool,
}

/// One battle session against a single monster.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub id: EncounterId,
    /// Battle-local copy: mutations here never touch the encounter pool.
    pub monster: Monster,
    pub phase: Phase,
    pub defending: bool,
    pub log: Vec<String>,
}

impl Encounter {
    /// Engage a monster. The caller hands over an owned snapshot.
    pub fn new(monster: Monster) -> Self {
        let log = vec![format!(
            "You encounter a level {} {}!",
            monster.level, monster.name
        )];
        Self {
            id: EncounterId::new(),
            monster,
            phase: Phase::PlayerTurn,
            defending: false,
            log,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Apply damage to the monster and resolve the turn: either the
    /// monster is defeated (phase moves to Ending) or the turn passes.
    fn strike(&mut self, damage: u32) -> StrikeOutcome {
        self.monster.health = self.monster.health.saturating_sub(damage);
        let monster_defeated = self.monster.health == 0;
        if monster_defeated {
            self.phase = Phase::Ending;
        } else {
            self.phase = Phase::MonsterTurn;
            self.defending = false;
        }
        StrikeOutcome {
            damage,
            monster_defeated,
        }
    }

    /// A plain attack.
    pub fn player_attack(&mut self, eff: &EffectiveStats) -> StrikeOutcome {
        let damage = attack_damage(eff.attack, self.monster.defense);
        self.push_log(format!(
            "You attack the {} for {} damage!",
            self.monster.name, damage
        ));
        self.strike(damage)
    }

    /// A skill strike: the plain attack formula, plus the skill's bonus
    /// when it is an attack skill. Other skill kinds pass through with
    /// no extra effect.
    pub fn player_skill(&mut self, eff: &EffectiveStats, skill: &Skill) -> StrikeOutcome {
        let mut damage = attack_damage(eff.attack, self.monster.defense);
        if skill.effect.kind == StatKind::Attack {
            damage += skill.effect.amount * skill.level;
        }
        self.push_log(format!(
            "You use {} on the {} for {} damage!",
            skill.name, self.monster.name, damage
        ));
        self.strike(damage)
    }

    /// A damage spell: flat spell power, ignoring defense.
    pub fn player_damage_spell(&mut self, spell: &Spell) -> StrikeOutcome {
        self.push_log(format!(
            "You cast {} on the {} for {} magical damage!",
            spell.name, self.monster.name, spell.power
        ));
        self.strike(spell.power)
    }

    /// Take a defensive stance: the next retaliation is halved.
    pub fn defend(&mut self) {
        self.defending = true;
        self.push_log("You take a defensive stance, reducing incoming damage!");
        self.phase = Phase::MonsterTurn;
    }

    /// Attempt to flee. Success moves to Ending; failure forfeits the
    /// turn to the monster.
    pub fn flee<R: Rng>(&mut self, rng: &mut R) -> bool {
        if rng.gen_bool(balance::FLEE_SUCCESS_CHANCE) {
            self.push_log("You successfully fled from battle!");
            self.phase = Phase::Ending;
            true
        } else {
            self.push_log("You failed to flee!");
            self.phase = Phase::MonsterTurn;
            self.defending = false;
            false
        }
    }

    /// The monster's retaliation, fired by the scheduler once the delay
    /// elapses. Defeat moves to Ending; otherwise the turn returns to
    /// the player and the defend flag resets.
    pub fn monster_retaliation(
        &mut self,
        player: &mut Player,
        eff: &EffectiveStats,
    ) -> RetaliationOutcome {
        let mut damage = attack_damage(self.monster.attack, eff.defense);
        if self.defending {
            damage = defended_damage(damage);
            self.push_log("Your defensive stance reduces the damage!");
        }

        let player_defeated = player.take_damage(damage);
        self.push_log(format!(
            "The {} attacks you for {} damage!",
            self.monster.name, damage
        ));

        if player_defeated {
            self.push_log("You have been defeated!");
            self.phase = Phase::Ending;
        } else {
            self.phase = Phase::PlayerTurn;
            self.defending = false;
        }

        RetaliationOutcome {
            damage,
            player_defeated,
        }
    }
}

// ============================================================================
// Deferred events
// ============================================================================

/// What a scheduled event does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// The monster takes its turn.
    MonsterStrike,
    /// Clear a won battle and hand out nothing further.
    ClearVictory,
    /// Clear a lost battle and restore partial health.
    ClearDefeat,
    /// Clear a successfully fled battle.
    ClearFlee,
}

/// A deferred battle event on the session clock.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub encounter: EncounterId,
    pub due_ms: u64,
    pub action: DeferredAction,
}

/// The deferred-event queue.
///
/// Events are keyed by encounter id; the session drops events whose
/// encounter is no longer live, which is what cancels the original's
/// stale timers ("last transition wins").
#[derive(Debug, Default)]
pub struct Scheduler {
    events: Vec<ScheduledEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, encounter: EncounterId, due_ms: u64, action: DeferredAction) {
        self.events.push(ScheduledEvent {
            encounter,
            due_ms,
            action,
        });
    }

    /// Drop every pending event for an encounter.
    pub fn cancel(&mut self, encounter: EncounterId) {
        self.events.retain(|event| event.encounter != encounter);
    }

    /// Remove and return all events due at or before `now_ms`, in firing
    /// order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<ScheduledEvent> {
        let mut due: Vec<ScheduledEvent> = self
            .events
            .iter()
            .copied()
            .filter(|event| event.due_ms <= now_ms)
            .collect();
        self.events.retain(|event| event.due_ms > now_ms);
        due.sort_by_key(|event| event.due_ms);
        due
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
