//! Commands for the Combat Resolution context.

use beastarena_core::command::Command;
use uuid::Uuid;

use super::battle::BattleConfig;
use super::creature::Side;

/// Command to resolve one battle between two sides.
#[derive(Debug, Clone)]
pub struct ResolveBattle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The battle identifier.
    pub battle_id: Uuid,
    /// The side that initiated the battle.
    pub attacker: Side,
    /// The side being challenged.
    pub defender: Side,
    /// Per-battle tuning.
    pub config: BattleConfig,
}

impl Command for ResolveBattle {
    fn command_type(&self) -> &'static str {
        "combat.resolve_battle"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
