//! Battle-local creature and side snapshots.

use beastarena_content::domain::stats::{AttackType, Stat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{self, StatusEffect};

/// The six combat stats of a creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    /// Maximum hit points.
    pub max_hp: i64,
    /// Physical attack.
    pub physical_attack: i64,
    /// Magic attack.
    pub magic_attack: i64,
    /// Physical defense.
    pub physical_defense: i64,
    /// Magic defense.
    pub magic_defense: i64,
    /// Speed.
    pub speed: i64,
}

impl StatBlock {
    /// Reads one stat.
    #[must_use]
    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Hp => self.max_hp,
            Stat::PhysicalAttack => self.physical_attack,
            Stat::MagicAttack => self.magic_attack,
            Stat::PhysicalDefense => self.physical_defense,
            Stat::MagicDefense => self.magic_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Overwrites one stat.
    pub fn set(&mut self, stat: Stat, value: i64) {
        match stat {
            Stat::Hp => self.max_hp = value,
            Stat::PhysicalAttack => self.physical_attack = value,
            Stat::MagicAttack => self.magic_attack = value,
            Stat::PhysicalDefense => self.physical_defense = value,
            Stat::MagicDefense => self.magic_defense = value,
            Stat::Speed => self.speed = value,
        }
    }
}

/// Per-stat ratings used by the turn-order tie-break (stars, aptitudes).
///
/// `attack` is the rating of the creature's main offensive stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSpread {
    /// Rating of HP.
    pub hp: i64,
    /// Rating of the main offensive stat.
    pub attack: i64,
    /// Rating of physical defense.
    pub physical_defense: i64,
    /// Rating of magic defense.
    pub magic_defense: i64,
    /// Rating of speed.
    pub speed: i64,
}

impl StatSpread {
    /// All ratings zero.
    pub const ZERO: Self = Self {
        hp: 0,
        attack: 0,
        physical_defense: 0,
        magic_defense: 0,
        speed: 0,
    };

    /// Sum of all five ratings.
    #[must_use]
    pub fn total(&self) -> i64 {
        [self.attack, self.physical_defense, self.magic_defense, self.speed]
            .into_iter()
            .fold(self.hp, i64::saturating_add)
    }
}

/// Secondary data consulted only when effective speeds are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakProfile {
    /// Grade/tier; higher acts first.
    pub grade: i32,
    /// Star ratings.
    pub stars: StatSpread,
    /// Aptitude values.
    pub aptitudes: StatSpread,
}

/// Traits granted by buff skills' special effects, baked before the battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatTraits {
    /// Additive trigger-rate bonus for poison-class actives.
    pub poison_enhance: f64,
    /// Fractional reduction of attackers' critical-class trigger rates.
    pub critical_resist: f64,
    /// Attacks by this creature never provoke reflect or counter.
    pub immune_counter: bool,
    /// Probability of shrugging off an incoming poison.
    pub poison_resist: f64,
}

/// A creature as it exists for the duration of one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    /// Creature identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Which stat pair this creature attacks with.
    pub attack_type: AttackType,
    /// Current hit points; the creature is dead at or below zero.
    pub current_hp: i64,
    /// Combat stats, with buff/debuff skills baked in once the battle starts.
    pub stats: StatBlock,
    /// Skill identifiers resolved against the catalog.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Turn-order tie-break data.
    #[serde(default)]
    pub tie_break: TieBreakProfile,
    /// Traits from buff skills' special effects.
    #[serde(default)]
    pub traits: CombatTraits,
    /// Active status effects.
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
}

impl CreatureSnapshot {
    /// Creates a creature at full health with no skills and neutral tie-break data.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, attack_type: AttackType, stats: StatBlock) -> Self {
        Self {
            id,
            name: name.into(),
            attack_type,
            current_hp: stats.max_hp,
            stats,
            skills: Vec::new(),
            tie_break: TieBreakProfile::default(),
            traits: CombatTraits::default(),
            status_effects: Vec::new(),
        }
    }

    /// Replaces the skill list.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the tie-break profile.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreakProfile) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Returns `true` while HP is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Base stat adjusted by active stat-up/stat-down effects.
    #[must_use]
    pub fn effective_stat(&self, stat: Stat) -> i64 {
        status::effective_stat(self.stats.get(stat), stat, &self.status_effects)
    }

    /// Effective speed; the first turn-order criterion.
    #[must_use]
    pub fn effective_speed(&self) -> i64 {
        self.effective_stat(Stat::Speed)
    }

    /// The base value of this creature's main offensive stat.
    #[must_use]
    pub fn main_attack(&self) -> i64 {
        self.stats.get(self.attack_type.offensive_stat())
    }

    /// Removes `amount` HP, never going below zero. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
        before - self.current_hp
    }

    /// Restores `amount` HP, capped at max HP. Returns HP actually gained.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.stats.max_hp);
        (self.current_hp - before).max(0)
    }
}

/// One of the two parties in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Side {
    /// Side identifier (player, guardian set, encounter).
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Creatures in fixed fighting order.
    pub roster: Vec<CreatureSnapshot>,
}

impl Side {
    /// Creates a side.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, roster: Vec<CreatureSnapshot>) -> Self {
        Self {
            id,
            name: name.into(),
            roster,
        }
    }

    /// Name shown in descriptions; falls back to the id when blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }

    /// Index of the active creature: the first living roster member.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.roster.iter().position(CreatureSnapshot::is_alive)
    }

    /// The active creature, if any survives.
    #[must_use]
    pub fn active(&self) -> Option<&CreatureSnapshot> {
        self.active_index().map(|idx| &self.roster[idx])
    }

    /// A side is defeated once every roster member is at or below zero HP.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.active_index().is_none()
    }

    /// Sum of remaining HP over living creatures.
    #[must_use]
    pub fn total_remaining_hp(&self) -> i64 {
        self.roster
            .iter()
            .filter(|creature| creature.is_alive())
            .map(|creature| creature.current_hp)
            .fold(0, i64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(max_hp: i64) -> StatBlock {
        StatBlock {
            max_hp,
            physical_attack: 100,
            magic_attack: 80,
            physical_defense: 50,
            magic_defense: 40,
            speed: 30,
        }
    }

    fn creature(hp: i64) -> CreatureSnapshot {
        CreatureSnapshot::new(Uuid::new_v4(), "Ember Fox", AttackType::Physical, stats(hp))
    }

    #[test]
    fn test_new_creature_starts_at_full_health() {
        let fox = creature(120);
        assert_eq!(fox.current_hp, 120);
        assert!(fox.is_alive());
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut fox = creature(30);
        assert_eq!(fox.take_damage(50), 30);
        assert_eq!(fox.current_hp, 0);
        assert!(!fox.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max_hp() {
        let mut fox = creature(100);
        fox.take_damage(10);
        assert_eq!(fox.heal(25), 10);
        assert_eq!(fox.current_hp, 100);
    }

    #[test]
    fn test_main_attack_follows_attack_type() {
        let mut fox = creature(100);
        assert_eq!(fox.main_attack(), 100);
        fox.attack_type = AttackType::Magic;
        assert_eq!(fox.main_attack(), 80);
    }

    #[test]
    fn test_active_index_skips_dead_members() {
        let mut first = creature(10);
        first.current_hp = 0;
        let second = creature(10);
        let side = Side::new(Uuid::new_v4(), "Player", vec![first, second.clone()]);

        assert_eq!(side.active_index(), Some(1));
        assert_eq!(side.active().unwrap().id, second.id);
        assert!(!side.is_defeated());
    }

    #[test]
    fn test_side_defeated_when_all_dead() {
        let mut only = creature(10);
        only.current_hp = -3;
        let side = Side::new(Uuid::new_v4(), "Player", vec![only]);

        assert!(side.is_defeated());
        assert_eq!(side.total_remaining_hp(), 0);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let id = Uuid::new_v4();
        let side = Side::new(id, "  ", Vec::new());
        assert_eq!(side.display_name(), id.to_string());
    }

    #[test]
    fn test_total_remaining_hp_saturates() {
        let mut giant = creature(10);
        giant.stats.max_hp = i64::MAX;
        giant.current_hp = i64::MAX;
        let side = Side::new(Uuid::new_v4(), "Player", vec![giant.clone(), giant]);

        assert_eq!(side.total_remaining_hp(), i64::MAX);
    }

    #[test]
    fn test_stat_spread_total() {
        let spread = StatSpread {
            hp: 1,
            attack: 2,
            physical_defense: 3,
            magic_defense: 4,
            speed: 5,
        };
        assert_eq!(spread.total(), 15);
        assert_eq!(StatSpread::ZERO.total(), 0);
    }
}
