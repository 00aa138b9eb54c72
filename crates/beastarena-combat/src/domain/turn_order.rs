//! Turn order between the two active creatures.
//!
//! Criteria, first difference wins:
//! 1. effective speed
//! 2. grade
//! 3. star total
//! 4. aptitude total
//! 5. stat total (max HP + main attack + both defenses + effective speed)
//! 6. coin flip

use std::cmp::Ordering;

use beastarena_core::rng::DeterministicRng;

use super::creature::CreatureSnapshot;

/// Which of the two compared creatures acts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initiative {
    /// The first argument acts first.
    First,
    /// The second argument acts first.
    Second,
}

fn stat_total(creature: &CreatureSnapshot) -> i64 {
    [
        creature.main_attack(),
        creature.stats.physical_defense,
        creature.stats.magic_defense,
        creature.effective_speed(),
    ]
    .into_iter()
    .fold(creature.stats.max_hp, i64::saturating_add)
}

/// Deterministic part of the cascade. `Greater` means `a` acts first;
/// `Equal` means the creatures are indistinguishable and a coin flip decides.
#[must_use]
pub fn compare_initiative(a: &CreatureSnapshot, b: &CreatureSnapshot) -> Ordering {
    a.effective_speed()
        .cmp(&b.effective_speed())
        .then_with(|| a.tie_break.grade.cmp(&b.tie_break.grade))
        .then_with(|| a.tie_break.stars.total().cmp(&b.tie_break.stars.total()))
        .then_with(|| {
            a.tie_break
                .aptitudes
                .total()
                .cmp(&b.tie_break.aptitudes.total())
        })
        .then_with(|| stat_total(a).cmp(&stat_total(b)))
}

/// Decides who acts first, drawing from `rng` only on a full tie.
pub fn resolve_turn_order(
    a: &CreatureSnapshot,
    b: &CreatureSnapshot,
    rng: &mut dyn DeterministicRng,
) -> Initiative {
    match compare_initiative(a, b) {
        Ordering::Greater => Initiative::First,
        Ordering::Less => Initiative::Second,
        Ordering::Equal => {
            if rng.next_u32_range(0, 1) == 0 {
                Initiative::First
            } else {
                Initiative::Second
            }
        }
    }
}
