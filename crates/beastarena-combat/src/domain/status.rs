//! Status effects: attachment, effective-stat queries, and per-exchange upkeep.
//!
//! Re-applying an effect of the same kind refreshes it: the newer magnitude,
//! duration and source replace the old ones. Effects never stack. Two
//! effects are the same kind when both are poison, or both modify the same
//! stat in the same direction.

use beastarena_content::domain::skills::EffectSpec;
use beastarena_content::domain::stats::Stat;
use serde::{Deserialize, Serialize};

use super::creature::CreatureSnapshot;

/// What a status effect does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Loses a fraction of max HP on every upkeep tick.
    Poison,
    /// Temporarily lowers one stat.
    StatDown(Stat),
    /// Temporarily raises one stat.
    StatUp(Stat),
}

/// A status effect carried by one creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Effect kind.
    pub kind: StatusKind,
    /// Fraction: of max HP for poison, of the stat otherwise.
    pub magnitude: f64,
    /// Upkeep ticks left; pruned at zero.
    pub remaining: u32,
    /// Display name of the skill that attached it.
    pub source_skill: String,
}

impl StatusEffect {
    /// Converts a skill effect into a status effect. Lifesteal has no
    /// persistent form and yields `None`.
    #[must_use]
    pub fn from_spec(spec: &EffectSpec, source_skill: &str) -> Option<Self> {
        let (kind, magnitude, remaining) = match *spec {
            EffectSpec::Poison { value, duration } => (StatusKind::Poison, value, duration),
            EffectSpec::StatDown {
                stat,
                value,
                duration,
            } => (StatusKind::StatDown(stat), value, duration),
            EffectSpec::StatUp {
                stat,
                value,
                duration,
            } => (StatusKind::StatUp(stat), value, duration),
            EffectSpec::Lifesteal { .. } => return None,
        };
        Some(Self {
            kind,
            magnitude,
            remaining,
            source_skill: source_skill.to_owned(),
        })
    }

    /// Short English label, e.g. `"speed -20% for 2 exchanges"`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn label(&self) -> String {
        let percent = (self.magnitude * 100.0).round() as i64;
        match self.kind {
            StatusKind::Poison => format!("poison for {} exchanges", self.remaining),
            StatusKind::StatDown(stat) => format!(
                "{} -{percent}% for {} exchanges",
                stat.label(),
                self.remaining
            ),
            StatusKind::StatUp(stat) => format!(
                "{} +{percent}% for {} exchanges",
                stat.label(),
                self.remaining
            ),
        }
    }
}

/// Attaches `incoming`, refreshing an existing effect of the same kind.
pub fn apply_or_refresh(effects: &mut Vec<StatusEffect>, incoming: StatusEffect) {
    if let Some(existing) = effects.iter_mut().find(|e| e.kind == incoming.kind) {
        *existing = incoming;
    } else {
        effects.push(incoming);
    }
}

/// Reads a stat through the active modifiers without mutating the base value.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn effective_stat(base: i64, stat: Stat, effects: &[StatusEffect]) -> i64 {
    let mut value = base as f64;
    for effect in effects.iter().filter(|e| e.remaining > 0) {
        match effect.kind {
            StatusKind::StatDown(s) if s == stat => value *= (1.0 - effect.magnitude).max(0.0),
            StatusKind::StatUp(s) if s == stat => value *= 1.0 + effect.magnitude,
            _ => {}
        }
    }
    (value.floor() as i64).max(0)
}

/// HP lost to one poison during upkeep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoisonTick {
    /// Skill that attached the poison.
    pub source_skill: String,
    /// HP actually lost.
    pub damage: i64,
}

/// Poison damage for one tick: a fraction of max HP, at least 1.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn poison_damage(max_hp: i64, magnitude: f64) -> i64 {
    ((max_hp as f64 * magnitude).floor() as i64).max(1)
}

/// Runs one upkeep tick on a creature: poison deals damage, every effect
/// loses one remaining exchange, and expired effects are pruned.
///
/// Dead creatures are left untouched.
pub fn tick_effects(creature: &mut CreatureSnapshot) -> Vec<PoisonTick> {
    if !creature.is_alive() {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    let max_hp = creature.stats.max_hp;
    let mut effects = std::mem::take(&mut creature.status_effects);

    for effect in &mut effects {
        if effect.remaining == 0 {
            continue;
        }
        if effect.kind == StatusKind::Poison && creature.is_alive() {
            let lost = creature.take_damage(poison_damage(max_hp, effect.magnitude));
            ticks.push(PoisonTick {
                source_skill: effect.source_skill.clone(),
                damage: lost,
            });
        }
        effect.remaining = effect.remaining.saturating_sub(1);
    }

    effects.retain(|e| e.remaining > 0);
    creature.status_effects = effects;
    ticks
}
