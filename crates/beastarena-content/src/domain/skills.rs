//! Skill definitions as authored in the catalog.

use serde::{Deserialize, Serialize};

use super::stats::{AttackType, Stat, StatTarget};

/// Default fraction of received damage returned by a reflect reaction.
pub const DEFAULT_REFLECT_RATIO: f64 = 0.44;

/// Default fraction of received damage returned by a counter reaction.
pub const DEFAULT_COUNTER_RATIO: f64 = 0.75;

/// How and when a skill takes part in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    /// Rolled by the attacker; replaces a basic attack when it fires.
    Active,
    /// Rolled by the defender in response to being attacked.
    Passive,
    /// Permanent percentage bonus baked in before the battle.
    Buff,
    /// Permanent percentage penalty baked in before the battle.
    Debuff,
}

/// Rarity tier of a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    /// Common skill.
    #[default]
    Normal,
    /// Advanced skill.
    Advanced,
}

/// An effect carried by an active skill when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectSpec {
    /// Damage over time: `value` is the fraction of max HP lost per tick.
    Poison {
        /// Fraction of max HP per tick.
        value: f64,
        /// Number of upkeep ticks.
        duration: u32,
    },
    /// Temporary percentage reduction of one stat.
    StatDown {
        /// Affected stat.
        stat: Stat,
        /// Fractional reduction.
        value: f64,
        /// Number of upkeep ticks.
        duration: u32,
    },
    /// Temporary percentage increase of one stat.
    StatUp {
        /// Affected stat.
        stat: Stat,
        /// Fractional increase.
        value: f64,
        /// Number of upkeep ticks.
        duration: u32,
    },
    /// Heals the attacker by a fraction of the damage dealt.
    Lifesteal {
        /// Fraction of damage dealt.
        value: f64,
    },
}

impl EffectSpec {
    /// Returns `true` for effects that persist on the defender.
    #[must_use]
    pub fn is_status(&self) -> bool {
        !matches!(self, Self::Lifesteal { .. })
    }
}

/// A defender's reaction carried by a passive skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PassiveReaction {
    /// Negates a basic attack entirely.
    Dodge,
    /// Returns a fraction of the damage taken to the attacker.
    Reflect {
        /// Fraction of damage returned.
        #[serde(default = "default_reflect_ratio")]
        ratio: f64,
    },
    /// Strikes back for a fraction of the damage taken.
    Counter {
        /// Fraction of damage returned.
        #[serde(default = "default_counter_ratio")]
        ratio: f64,
    },
}

fn default_reflect_ratio() -> f64 {
    DEFAULT_REFLECT_RATIO
}

fn default_counter_ratio() -> f64 {
    DEFAULT_COUNTER_RATIO
}

/// A signed percentage modifier applied by a buff or debuff skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    /// Which stat is modified.
    pub stat: StatTarget,
    /// Signed fraction, e.g. `0.1` for +10% or `-0.2` for -20%.
    pub percent: f64,
}

/// Non-stat traits granted by buff skills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialTrait {
    /// Adds to the trigger rate of the holder's poison-class actives.
    PoisonEnhance {
        /// Additive trigger-rate bonus.
        value: f64,
    },
    /// Scales down attackers' critical-class trigger rates.
    CriticalResist {
        /// Fractional reduction.
        value: f64,
    },
    /// The holder's attacks never provoke reflect or counter.
    ImmuneCounter,
    /// Chance to shrug off an incoming poison.
    PoisonResist {
        /// Probability of ignoring the poison.
        value: f64,
    },
}

/// One entry of the skill catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// Stable identifier referenced by creatures.
    pub id: String,
    /// Display name shown in battle logs.
    pub name: String,
    /// Category.
    pub category: SkillCategory,
    /// Tier.
    #[serde(default)]
    pub tier: SkillTier,
    /// Probability in `[0, 1]` of firing when rolled.
    #[serde(default)]
    pub trigger_rate: f64,
    /// Damage multiplier applied when an active skill fires.
    #[serde(default = "default_damage_multiplier")]
    pub damage_multiplier: f64,
    /// Restricts an active skill to attackers of this type.
    #[serde(default)]
    pub attack_type: Option<AttackType>,
    /// Critical-class skills are scaled down by the defender's resist.
    #[serde(default)]
    pub critical: bool,
    /// When this skill fires, the defender cannot reflect or counter.
    #[serde(default)]
    pub immune_to_counter: bool,
    /// Effects attached when an active skill fires.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    /// Reaction of a passive skill.
    #[serde(default)]
    pub passive: Option<PassiveReaction>,
    /// Stat modifiers of a buff/debuff skill.
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
    /// Special trait of a buff skill.
    #[serde(default)]
    pub special: Option<SpecialTrait>,
}

fn default_damage_multiplier() -> f64 {
    1.0
}

impl SkillDefinition {
    /// Returns `true` if an active skill may be used by an attacker of `attack_type`.
    #[must_use]
    pub fn allows(&self, attack_type: AttackType) -> bool {
        self.attack_type.is_none_or(|restriction| restriction == attack_type)
    }

    /// Poison-class skills attach a poison effect.
    #[must_use]
    pub fn is_poison_class(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, EffectSpec::Poison { .. }))
    }

    /// Lifesteal fraction, if the skill carries one.
    #[must_use]
    pub fn lifesteal(&self) -> Option<f64> {
        self.effects.iter().find_map(|effect| match effect {
            EffectSpec::Lifesteal { value } => Some(*value),
            _ => None,
        })
    }

    /// Effects that persist on the defender after the skill fires.
    pub fn status_effects(&self) -> impl Iterator<Item = &EffectSpec> {
        self.effects.iter().filter(|effect| effect.is_status())
    }
}
