//! One attack from one active creature against the other.
//!
//! Order: active roll, passive roll, damage, dodge, lifesteal, reflect or
//! counter, status effects. The passive roll happens before damage lands, so
//! a dodge can save a creature from a lethal basic attack. Reflect and counter
//! need the defender to survive the hit.

use beastarena_content::domain::catalog::SkillCatalog;
use beastarena_content::domain::skills::PassiveReaction;
use beastarena_core::rng::DeterministicRng;

use super::creature::CreatureSnapshot;
use super::damage::resolve_damage;
use super::events::ReactionKind;
use super::skills::{roll_active_skill, roll_passive_skill};
use super::status::{StatusEffect, StatusKind, apply_or_refresh};

/// Skill name recorded for a basic attack.
pub const BASIC_ATTACK: &str = "basic";

/// A passive reaction that fired during an attack.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Display name of the passive skill.
    pub skill_name: String,
    /// Reaction kind.
    pub kind: ReactionKind,
    /// Damage returned to the attacker.
    pub returned_damage: i64,
}

/// Everything that happened during one attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    /// Fired active skill's display name, or [`BASIC_ATTACK`].
    pub skill_name: String,
    /// HP the defender lost.
    pub damage: i64,
    /// The defender dodged.
    pub dodged: bool,
    /// HP the attacker regained.
    pub lifesteal_heal: i64,
    /// Passive reaction, if any.
    pub reaction: Option<Reaction>,
    /// Labels of effects attached to the defender.
    pub applied_effects: Vec<String>,
    /// A poison was shrugged off by the defender's resistance.
    pub poison_resisted: bool,
}

impl AttackReport {
    /// Returns `true` if no active skill fired.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.skill_name == BASIC_ATTACK
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn fraction_of(amount: i64, fraction: f64) -> i64 {
    (amount as f64 * fraction).floor() as i64
}

/// Resolves one attack, mutating both creatures.
pub fn resolve_attack(
    attacker: &mut CreatureSnapshot,
    defender: &mut CreatureSnapshot,
    catalog: &SkillCatalog,
    rng: &mut dyn DeterministicRng,
) -> AttackReport {
    let active = roll_active_skill(attacker, defender, catalog, rng);
    let basic = active.is_none();
    let counter_immune =
        attacker.traits.immune_counter || active.is_some_and(|skill| skill.immune_to_counter);

    let passive = roll_passive_skill(defender, catalog, basic, counter_immune, rng);
    let multiplier = active.map_or(1.0, |skill| skill.damage_multiplier);
    let dodged = matches!(passive, Some((_, PassiveReaction::Dodge)));

    let damage = if dodged {
        0
    } else {
        defender.take_damage(resolve_damage(attacker, defender, multiplier))
    };

    let lifesteal_heal = match active.and_then(|skill| skill.lifesteal()) {
        Some(fraction) if damage > 0 => attacker.heal(fraction_of(damage, fraction)),
        _ => 0,
    };

    let reaction = passive.and_then(|(skill, reaction)| {
        let (kind, returned_damage) = match reaction {
            PassiveReaction::Dodge => (ReactionKind::Dodge, 0),
            PassiveReaction::Reflect { ratio } | PassiveReaction::Counter { ratio } => {
                // A reaction that returns nothing leaves no trace in the log.
                if damage <= 0 || !defender.is_alive() {
                    return None;
                }
                let kind = if matches!(reaction, PassiveReaction::Reflect { .. }) {
                    ReactionKind::Reflect
                } else {
                    ReactionKind::Counter
                };
                (kind, attacker.take_damage(fraction_of(damage, ratio)))
            }
        };
        Some(Reaction {
            skill_name: skill.name.clone(),
            kind,
            returned_damage,
        })
    });

    let mut applied_effects = Vec::new();
    let mut poison_resisted = false;
    if let Some(skill) = active.filter(|_| !dodged && defender.is_alive()) {
        for spec in skill.status_effects() {
            let Some(effect) = StatusEffect::from_spec(spec, &skill.name) else {
                continue;
            };
            if effect.kind == StatusKind::Poison && rng.roll(defender.traits.poison_resist) {
                poison_resisted = true;
                continue;
            }
            applied_effects.push(effect.label());
            apply_or_refresh(&mut defender.status_effects, effect);
        }
    }

    AttackReport {
        skill_name: active.map_or_else(|| BASIC_ATTACK.to_owned(), |skill| skill.name.clone()),
        damage,
        dodged,
        lifesteal_heal,
        reaction,
        applied_effects,
        poison_resisted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creature::StatBlock;
    use beastarena_content::domain::skills::{EffectSpec, SkillDefinition};
    use beastarena_content::domain::stats::AttackType;
    use beastarena_test_support::{CatalogBuilder, FixedRng, MockRng, active_skill, passive_skill};
    use uuid::Uuid;

    fn attacker(skills: &[&str]) -> CreatureSnapshot {
        CreatureSnapshot::new(
            Uuid::new_v4(),
            "Storm Wolf",
            AttackType::Physical,
            StatBlock {
                max_hp: 1000,
                physical_attack: 1500,
                magic_attack: 0,
                physical_defense: 1000,
                magic_defense: 1000,
                speed: 100,
            },
        )
        .with_skills(skills.iter().copied())
    }

    fn defender(skills: &[&str]) -> CreatureSnapshot {
        CreatureSnapshot::new(
            Uuid::new_v4(),
            "Stone Tortoise",
            AttackType::Magic,
            StatBlock {
                max_hp: 1000,
                physical_attack: 0,
                magic_attack: 800,
                physical_defense: 1000,
                magic_defense: 1000,
                speed: 50,
            },
        )
        .with_skills(skills.iter().copied())
    }

    fn poison_fang() -> SkillDefinition {
        active_skill(
            "venom_fang",
            1.0,
            1.0,
            vec![EffectSpec::Poison {
                value: 0.05,
                duration: 3,
            }],
        )
    }

    #[test]
    fn test_basic_attack_without_skills() {
        let catalog = CatalogBuilder::new().build();
        let mut wolf = attacker(&[]);
        let mut tortoise = defender(&[]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert!(report.is_basic());
        assert_eq!(report.damage, 35);
        assert_eq!(tortoise.current_hp, 965);
        assert!(report.reaction.is_none());
    }

    #[test]
    fn test_active_skill_multiplies_damage() {
        let catalog = CatalogBuilder::new()
            .skill(active_skill("crush", 0.5, 2.0, Vec::new()))
            .build();
        let mut wolf = attacker(&["crush"]);
        let mut tortoise = defender(&[]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);
        assert_eq!(report.skill_name, "crush");
        assert_eq!(report.damage, 70);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut FixedRng(0.9));
        assert!(report.is_basic());
        assert_eq!(report.damage, 35);
    }

    #[test]
    fn test_dodge_zeroes_basic_attack_even_when_lethal() {
        let catalog = CatalogBuilder::new()
            .skill(passive_skill("shadow_step", 1.0, PassiveReaction::Dodge))
            .build();
        let mut wolf = attacker(&[]);
        let mut tortoise = defender(&["shadow_step"]);
        tortoise.current_hp = 20;

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert!(report.dodged);
        assert_eq!(report.damage, 0);
        assert_eq!(tortoise.current_hp, 20);
        assert_eq!(report.reaction.map(|r| r.kind), Some(ReactionKind::Dodge));
    }

    #[test]
    fn test_dodge_cannot_evade_active_skill() {
        let catalog = CatalogBuilder::new()
            .skill(active_skill("crush", 1.0, 2.0, Vec::new()))
            .skill(passive_skill("shadow_step", 1.0, PassiveReaction::Dodge))
            .build();
        let mut wolf = attacker(&["crush"]);
        let mut tortoise = defender(&["shadow_step"]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert!(!report.dodged);
        assert_eq!(report.damage, 70);
    }

    #[test]
    fn test_lifesteal_heals_fraction_of_damage() {
        let catalog = CatalogBuilder::new()
            .skill(active_skill(
                "blood_bite",
                1.0,
                2.0,
                vec![EffectSpec::Lifesteal { value: 0.5 }],
            ))
            .build();
        let mut wolf = attacker(&["blood_bite"]);
        wolf.current_hp = 500;
        let mut tortoise = defender(&[]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert_eq!(report.damage, 70);
        assert_eq!(report.lifesteal_heal, 35);
        assert_eq!(wolf.current_hp, 535);
    }

    #[test]
    fn test_lifesteal_capped_at_max_hp() {
        let catalog = CatalogBuilder::new()
            .skill(active_skill(
                "blood_bite",
                1.0,
                2.0,
                vec![EffectSpec::Lifesteal { value: 1.0 }],
            ))
            .build();
        let mut wolf = attacker(&["blood_bite"]);
        wolf.current_hp = 990;
        let mut tortoise = defender(&[]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert_eq!(report.lifesteal_heal, 10);
        assert_eq!(wolf.current_hp, 1000);
    }

    #[test]
    fn test_reflect_returns_fraction_of_applied_damage() {
        let catalog = CatalogBuilder::new()
            .skill(passive_skill(
                "thorns",
                1.0,
                PassiveReaction::Reflect { ratio: 0.44 },
            ))
            .build();
        let mut wolf = attacker(&[]);
        let mut tortoise = defender(&["thorns"]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        let reaction = report.reaction.unwrap();
        assert_eq!(reaction.kind, ReactionKind::Reflect);
        assert_eq!(reaction.returned_damage, 15);
        assert_eq!(wolf.current_hp, 985);
    }

    #[test]
    fn test_counter_skipped_for_counter_immune_skill() {
        let mut ambush = active_skill("ambush", 1.0, 1.0, Vec::new());
        ambush.immune_to_counter = true;
        let catalog = CatalogBuilder::new()
            .skill(ambush)
            .skill(passive_skill(
                "riposte",
                1.0,
                PassiveReaction::Counter { ratio: 0.75 },
            ))
            .build();
        let mut wolf = attacker(&["ambush"]);
        let mut tortoise = defender(&["riposte"]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert!(report.reaction.is_none());
        assert_eq!(wolf.current_hp, 1000);
    }

    #[test]
    fn test_counter_skipped_for_immune_counter_trait() {
        let catalog = CatalogBuilder::new()
            .skill(passive_skill(
                "riposte",
                1.0,
                PassiveReaction::Counter { ratio: 0.75 },
            ))
            .build();
        let mut wolf = attacker(&[]);
        wolf.traits.immune_counter = true;
        let mut tortoise = defender(&["riposte"]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);
        assert!(report.reaction.is_none());
    }

    #[test]
    fn test_dead_defender_does_not_counter() {
        let catalog = CatalogBuilder::new()
            .skill(passive_skill(
                "riposte",
                1.0,
                PassiveReaction::Counter { ratio: 0.75 },
            ))
            .build();
        let mut wolf = attacker(&[]);
        let mut tortoise = defender(&["riposte"]);
        tortoise.current_hp = 20;

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert_eq!(report.damage, 20);
        assert!(!tortoise.is_alive());
        assert!(report.reaction.is_none());
        assert_eq!(wolf.current_hp, 1000);
    }

    #[test]
    fn test_poison_attaches_to_surviving_defender() {
        let catalog = CatalogBuilder::new().skill(poison_fang()).build();
        let mut wolf = attacker(&["venom_fang"]);
        let mut tortoise = defender(&[]);

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert_eq!(report.applied_effects, vec!["poison for 3 exchanges".to_owned()]);
        assert_eq!(tortoise.status_effects.len(), 1);
    }

    #[test]
    fn test_poison_resist_blocks_poison() {
        let catalog = CatalogBuilder::new().skill(poison_fang()).build();
        let mut wolf = attacker(&["venom_fang"]);
        let mut tortoise = defender(&[]);
        tortoise.traits.poison_resist = 1.0;

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert!(report.poison_resisted);
        assert!(report.applied_effects.is_empty());
        assert!(tortoise.status_effects.is_empty());
    }

    #[test]
    fn test_no_effects_on_dead_defender() {
        let catalog = CatalogBuilder::new().skill(poison_fang()).build();
        let mut wolf = attacker(&["venom_fang"]);
        let mut tortoise = defender(&[]);
        tortoise.current_hp = 10;

        let report = resolve_attack(&mut wolf, &mut tortoise, &catalog, &mut MockRng);

        assert!(!tortoise.is_alive());
        assert!(report.applied_effects.is_empty());
        assert!(tortoise.status_effects.is_empty());
    }
}
