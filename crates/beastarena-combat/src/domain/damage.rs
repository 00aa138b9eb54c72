//! Damage formula.
//!
//! ```text
//! diff = attack - defense            (stat pair chosen by attack type)
//! base = round(diff * 0.069)         when diff >= 0
//! base = 5                           when diff <  0   (chip damage)
//! hit  = max(1, floor(base * multiplier))
//! ```
//!
//! An evaded hit is exactly zero and never reaches this module's floor.

use super::creature::CreatureSnapshot;

/// Fraction of the attack/defense gap converted into damage.
pub const DAMAGE_COEFFICIENT: f64 = 0.069;

/// Flat damage dealt whenever attack is below defense.
pub const CHIP_DAMAGE: i64 = 5;

/// Smallest damage a non-evaded hit can deal.
pub const MIN_HIT_DAMAGE: i64 = 1;

/// Base damage from an offensive stat against the matching defensive stat.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn base_damage(attack: i64, defense: i64) -> i64 {
    let diff = attack.saturating_sub(defense);
    if diff >= 0 {
        (diff as f64 * DAMAGE_COEFFICIENT).round() as i64
    } else {
        CHIP_DAMAGE
    }
}

/// Applies a skill multiplier to base damage and enforces the hit floor.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn apply_multiplier(base: i64, multiplier: f64) -> i64 {
    ((base as f64 * multiplier).floor() as i64).max(MIN_HIT_DAMAGE)
}

/// Damage `attacker` deals to `defender` with the given multiplier, reading
/// both creatures' effective stats.
#[must_use]
pub fn resolve_damage(
    attacker: &CreatureSnapshot,
    defender: &CreatureSnapshot,
    multiplier: f64,
) -> i64 {
    let attack = attacker.effective_stat(attacker.attack_type.offensive_stat());
    let defense = defender.effective_stat(attacker.attack_type.defensive_stat());
    apply_multiplier(base_damage(attack, defense), multiplier)
}
