//! Game balance constants.
//!
//! Every tuning knob for progression, combat pacing, and the economy
//! lives here so balance passes touch a single file.

// ============================================================================
// Experience and Leveling
// ============================================================================

/// Experience required to reach level 2.
pub const BASE_EXPERIENCE_TO_NEXT_LEVEL: u32 = 100;

/// How much more experience each subsequent level requires.
pub const EXPERIENCE_LEVEL_MULTIPLIER: f64 = 1.5;

/// Multiplier applied to all experience gained.
pub const EXPERIENCE_GAIN_MULTIPLIER: f64 = 1.0;

/// Level cap.
pub const MAX_LEVEL: u32 = 50;

/// Skill points granted per level.
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;

/// Stat points granted per level.
pub const STAT_POINTS_PER_LEVEL: u32 = 3;

// Base combat stat growth per level.
pub const LEVEL_HEALTH_GAIN: u32 = 10;
pub const LEVEL_MANA_GAIN: u32 = 5;
pub const LEVEL_ATTACK_GAIN: u32 = 2;
pub const LEVEL_DEFENSE_GAIN: u32 = 1;

// ============================================================================
// Economy
// ============================================================================

/// Gold a fresh character starts with.
pub const STARTING_GOLD: u32 = 50;

/// Skill points a fresh character starts with.
pub const STARTING_SKILL_POINTS: u32 = 1;

// ============================================================================
// Combat
// ============================================================================

/// Chance that fleeing a battle succeeds.
pub const FLEE_SUCCESS_CHANCE: f64 = 0.5;

/// Flat mana cost of using any learned skill in battle.
pub const SKILL_MANA_COST: u32 = 10;

/// Generated monster levels range from `player level - BELOW` (min 1)
/// to `player level + ABOVE`.
pub const MONSTER_LEVEL_BELOW: u32 = 2;
pub const MONSTER_LEVEL_ABOVE: u32 = 3;

/// A monster whose generated level exceeds this multiple of its template
/// level gets the "Elite" name prefix.
pub const ELITE_LEVEL_RATIO: f64 = 1.5;

/// Fraction of effective max health restored after being defeated.
pub const DEATH_HEALTH_RECOVERY: f64 = 0.3;

/// Number of monsters in the encounter pool after a refresh.
pub const ENCOUNTER_POOL_SIZE: usize = 6;

// ============================================================================
// Battle pacing (milliseconds on the session clock)
// ============================================================================

/// Delay before the monster retaliates once the turn passes to it.
pub const MONSTER_TURN_DELAY_MS: u64 = 1000;

/// Delay before a decided battle (victory or defeat) clears.
pub const BATTLE_END_DELAY_MS: u64 = 2000;

/// Delay before a successfully fled battle clears.
pub const FLEE_END_DELAY_MS: u64 = 1000;

// ============================================================================
// Base stats for new characters
// ============================================================================

pub const BASE_HEALTH: u32 = 100;
pub const BASE_MANA: u32 = 50;
pub const BASE_ATTACK: u32 = 10;
pub const BASE_DEFENSE: u32 = 5;

/// Every attribute starts at this score before race/class modifiers.
pub const BASE_ATTRIBUTE_SCORE: u32 = 10;

/// Apply the global experience multiplier to a base amount.
pub fn scaled_experience(base: u32) -> u32 {
    (base as f64 * EXPERIENCE_GAIN_MULTIPLIER).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_experience_identity_at_default_multiplier() {
        assert_eq!(scaled_experience(0), 0);
        assert_eq!(scaled_experience(10), 10);
        assert_eq!(scaled_experience(137), 137);
    }
}
