//! Shared helpers for combat integration tests.
#![allow(dead_code)]

use beastarena_combat::domain::creature::{CreatureSnapshot, Side, StatBlock};
use beastarena_content::domain::stats::AttackType;
use uuid::Uuid;

/// Catalog shipped with the simulator demos.
pub const DEMO_CATALOG: &str = include_str!("../../../../demos/skills.yaml");

/// Matchup shipped with the simulator demos.
pub const DEMO_ROSTER: &str = include_str!("../../../../demos/roster.yaml");

/// A physical creature with zero defenses and a stable id.
pub fn beast(id: u128, name: &str, hp: i64, attack: i64, speed: i64) -> CreatureSnapshot {
    CreatureSnapshot::new(
        Uuid::from_u128(id),
        name,
        AttackType::Physical,
        StatBlock {
            max_hp: hp,
            physical_attack: attack,
            magic_attack: 0,
            physical_defense: 0,
            magic_defense: 0,
            speed,
        },
    )
}

/// A sturdier creature with defenses, for longer battles.
pub fn armored(id: u128, name: &str, attack_type: AttackType, skills: &[&str]) -> CreatureSnapshot {
    let speed = 100 + i64::try_from(id % 7).unwrap_or(0) * 10;
    CreatureSnapshot::new(
        Uuid::from_u128(id),
        name,
        attack_type,
        StatBlock {
            max_hp: 2000,
            physical_attack: 1600,
            magic_attack: 1500,
            physical_defense: 600,
            magic_defense: 700,
            speed,
        },
    )
    .with_skills(skills.iter().copied())
}

/// A side with a stable id.
pub fn side(id: u128, name: &str, roster: Vec<CreatureSnapshot>) -> Side {
    Side::new(Uuid::from_u128(id), name, roster)
}

/// Two three-creature sides using skills from the demo catalog.
pub fn skilled_sides() -> (Side, Side) {
    let attacker = side(
        0xA,
        "Player",
        vec![
            armored(1, "Azure Wolf", AttackType::Physical, &["crushing_blow", "sunder", "thorn_hide"]),
            armored(2, "Mist Fox", AttackType::Magic, &["frost_lance", "venom_fang", "shadow_step"]),
            armored(3, "Iron Bear", AttackType::Physical, &["ambush", "iron_hide", "riposte"]),
        ],
    );
    let defender = side(
        0xB,
        "Tower",
        vec![
            armored(4, "Stone Guardian", AttackType::Physical, &["double_strike", "riposte", "fierce"]),
            armored(5, "Ember Wraith", AttackType::Magic, &["blood_bite", "antidote_blood", "thorn_hide"]),
            armored(6, "Marsh Hydra", AttackType::Magic, &["venom_fang", "toxic_mastery", "steady_mind"]),
        ],
    );
    (attacker, defender)
}
