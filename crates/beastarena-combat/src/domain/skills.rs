//! Skill triggers and pre-battle skill baking.
//!
//! Skill ids missing from the catalog are treated as if the creature did not
//! have them; authored content may reference draft skills.

use std::collections::HashMap;

use beastarena_content::domain::catalog::SkillCatalog;
use beastarena_content::domain::skills::{
    PassiveReaction, SkillCategory, SkillDefinition, SpecialTrait,
};
use beastarena_content::domain::stats::Stat;
use beastarena_core::rng::DeterministicRng;
use tracing::debug;

use super::creature::CreatureSnapshot;

/// Trigger probability of an active skill for this attacker/defender pair.
///
/// Poison-class skills gain the attacker's `poison_enhance` additively;
/// critical-class skills are scaled by `1 - critical_resist` of the defender.
#[must_use]
pub fn active_trigger_rate(
    skill: &SkillDefinition,
    attacker: &CreatureSnapshot,
    defender: &CreatureSnapshot,
) -> f64 {
    let mut rate = skill.trigger_rate;
    if skill.is_poison_class() {
        rate += attacker.traits.poison_enhance;
    }
    if skill.critical {
        rate *= (1.0 - defender.traits.critical_resist).max(0.0);
    }
    rate.clamp(0.0, 1.0)
}

/// Rolls the attacker's active skills in shuffled order; the first to fire
/// replaces the basic attack. At most one fires.
pub fn roll_active_skill<'c>(
    attacker: &CreatureSnapshot,
    defender: &CreatureSnapshot,
    catalog: &'c SkillCatalog,
    rng: &mut dyn DeterministicRng,
) -> Option<&'c SkillDefinition> {
    let candidates: Vec<&SkillDefinition> = attacker
        .skills
        .iter()
        .filter_map(|id| catalog.get(id))
        .filter(|skill| {
            skill.category == SkillCategory::Active && skill.allows(attacker.attack_type)
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    for idx in rng.shuffle_indices(candidates.len()) {
        let skill = candidates[idx];
        if rng.roll(active_trigger_rate(skill, attacker, defender)) {
            debug!(creature = %attacker.id, skill = %skill.id, "active skill fired");
            return Some(skill);
        }
    }
    None
}

/// Rolls the defender's passive skills in shuffled order; at most one fires.
///
/// Dodge is only eligible against a basic attack. Reflect and counter are
/// skipped when the attack is immune to counters. Ineligible skills are
/// skipped without consuming a roll.
pub fn roll_passive_skill<'c>(
    defender: &CreatureSnapshot,
    catalog: &'c SkillCatalog,
    basic_attack: bool,
    counter_immune: bool,
    rng: &mut dyn DeterministicRng,
) -> Option<(&'c SkillDefinition, PassiveReaction)> {
    let candidates: Vec<(&SkillDefinition, PassiveReaction)> = defender
        .skills
        .iter()
        .filter_map(|id| catalog.get(id))
        .filter(|skill| skill.category == SkillCategory::Passive)
        .filter_map(|skill| skill.passive.map(|reaction| (skill, reaction)))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    for idx in rng.shuffle_indices(candidates.len()) {
        let (skill, reaction) = candidates[idx];
        let eligible = match reaction {
            PassiveReaction::Dodge => basic_attack,
            PassiveReaction::Reflect { .. } | PassiveReaction::Counter { .. } => !counter_immune,
        };
        if !eligible {
            continue;
        }
        if rng.roll(skill.trigger_rate) {
            debug!(creature = %defender.id, skill = %skill.id, "passive skill fired");
            return Some((skill, reaction));
        }
    }
    None
}

/// Permanently applies buff/debuff percentages and special traits to a
/// creature. Modifiers on the same stat add up before being applied as one
/// combined percentage. Returns the skill ids that were not in the catalog.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn bake_skill_modifiers(creature: &mut CreatureSnapshot, catalog: &SkillCatalog) -> Vec<String> {
    let mut missing = Vec::new();
    let mut totals: HashMap<Stat, f64> = HashMap::new();

    for id in &creature.skills {
        let Some(skill) = catalog.get(id) else {
            missing.push(id.clone());
            continue;
        };
        if !matches!(skill.category, SkillCategory::Buff | SkillCategory::Debuff) {
            continue;
        }
        for modifier in &skill.modifiers {
            *totals
                .entry(modifier.stat.resolve(creature.attack_type))
                .or_insert(0.0) += modifier.percent;
        }
        if let Some(special) = skill.special {
            match special {
                SpecialTrait::PoisonEnhance { value } => creature.traits.poison_enhance += value,
                SpecialTrait::CriticalResist { value } => creature.traits.critical_resist += value,
                SpecialTrait::ImmuneCounter => creature.traits.immune_counter = true,
                SpecialTrait::PoisonResist { value } => creature.traits.poison_resist += value,
            }
        }
    }

    for (stat, percent) in totals {
        let factor = (1.0 + percent).max(0.0);
        let base = creature.stats.get(stat);
        let adjusted = (base as f64 * factor).floor() as i64;
        if stat == Stat::Hp {
            // A creature never enters the battle dead because of its own debuffs.
            let max_hp = adjusted.max(1);
            let current = (creature.current_hp as f64 * factor).floor() as i64;
            creature.stats.max_hp = max_hp;
            creature.current_hp = current.clamp(1, max_hp);
        } else {
            creature.stats.set(stat, adjusted);
        }
    }

    missing
}
