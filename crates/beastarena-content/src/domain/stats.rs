//! Stat vocabulary shared by skill definitions and creature snapshots.

use std::fmt;
use std::str::FromStr;

use beastarena_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which offensive/defensive stat pair an attack uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    /// Physical attack against physical defense.
    Physical,
    /// Magic attack against magic defense.
    Magic,
}

impl AttackType {
    /// The offensive stat this attack type reads.
    #[must_use]
    pub fn offensive_stat(self) -> Stat {
        match self {
            Self::Physical => Stat::PhysicalAttack,
            Self::Magic => Stat::MagicAttack,
        }
    }

    /// The defender's stat that opposes this attack type.
    #[must_use]
    pub fn defensive_stat(self) -> Stat {
        match self {
            Self::Physical => Stat::PhysicalDefense,
            Self::Magic => Stat::MagicDefense,
        }
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => f.write_str("physical"),
            Self::Magic => f.write_str("magic"),
        }
    }
}

impl FromStr for AttackType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Ok(Self::Physical),
            "magic" => Ok(Self::Magic),
            other => Err(DomainError::Validation(format!(
                "unresolvable attack type: {other:?}"
            ))),
        }
    }
}

/// A concrete creature stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Maximum hit points.
    Hp,
    /// Physical attack.
    PhysicalAttack,
    /// Magic attack.
    MagicAttack,
    /// Physical defense.
    PhysicalDefense,
    /// Magic defense.
    MagicDefense,
    /// Speed.
    Speed,
}

impl Stat {
    /// Human-readable label used in battle descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::PhysicalAttack => "physical attack",
            Self::MagicAttack => "magic attack",
            Self::PhysicalDefense => "physical defense",
            Self::MagicDefense => "magic defense",
            Self::Speed => "speed",
        }
    }
}

/// The stat a buff/debuff modifier targets.
///
/// `Attack` is resolved against the creature's attack type, so a single
/// "weaken attack" debuff hits whichever offensive stat the creature uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatTarget {
    /// Maximum hit points.
    Hp,
    /// The creature's main offensive stat.
    Attack,
    /// Physical attack.
    PhysicalAttack,
    /// Magic attack.
    MagicAttack,
    /// Physical defense.
    PhysicalDefense,
    /// Magic defense.
    MagicDefense,
    /// Speed.
    Speed,
}

impl StatTarget {
    /// Resolves the target to a concrete stat for a creature of `attack_type`.
    #[must_use]
    pub fn resolve(self, attack_type: AttackType) -> Stat {
        match self {
            Self::Hp => Stat::Hp,
            Self::Attack => attack_type.offensive_stat(),
            Self::PhysicalAttack => Stat::PhysicalAttack,
            Self::MagicAttack => Stat::MagicAttack,
            Self::PhysicalDefense => Stat::PhysicalDefense,
            Self::MagicDefense => Stat::MagicDefense,
            Self::Speed => Stat::Speed,
        }
    }
}
