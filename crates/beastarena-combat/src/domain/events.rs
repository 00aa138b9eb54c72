//! Battle log entries, the battle result, and the domain event envelope.

use beastarena_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type emitted once a battle has been resolved.
pub const BATTLE_RESOLVED_EVENT_TYPE: &str = "combat.battle_resolved";

/// What produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackEventKind {
    /// A creature attacked the opposing active creature.
    Attack,
    /// A status effect ticked during upkeep; there is no acting creature.
    StatusTick,
}

/// One creature taking part in a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Side the creature fights for.
    pub side_id: Uuid,
    /// Display name of that side.
    pub side_name: String,
    /// Creature identifier.
    pub creature_id: Uuid,
    /// Creature display name.
    pub name: String,
}

/// Which passive reaction fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    /// The attack was negated.
    Dodge,
    /// Part of the damage was reflected.
    Reflect,
    /// The defender struck back.
    Counter,
}

/// A defender's passive reaction to one attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// Display name of the passive skill.
    pub skill_name: String,
    /// Reaction kind.
    pub kind: ReactionKind,
    /// Damage returned to the attacker; zero for a dodge.
    pub returned_damage: i64,
}

/// One entry of the battle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackEvent {
    /// Position in the battle, starting at 1. Dropped events still consume
    /// a sequence number.
    pub sequence: u64,
    /// Attack or status tick.
    pub kind: AttackEventKind,
    /// Acting creature; `None` for status ticks.
    pub actor: Option<Participant>,
    /// Creature that took the damage.
    pub target: Participant,
    /// Skill name, `"basic"` for a basic attack, or the poison's source skill.
    pub skill_name: String,
    /// Damage dealt to the target.
    pub damage: i64,
    /// Actor HP after the event, including lifesteal and returned damage.
    pub actor_hp_after: Option<i64>,
    /// Target HP after the event.
    pub target_hp_after: i64,
    /// The attack was dodged.
    #[serde(default)]
    pub dodged: bool,
    /// Passive reaction, if one fired.
    #[serde(default)]
    pub reaction: Option<ReactionRecord>,
    /// HP the actor regained through lifesteal.
    #[serde(default)]
    pub lifesteal_heal: i64,
    /// Labels of status effects attached to the target.
    #[serde(default)]
    pub applied_effects: Vec<String>,
    /// English description.
    pub description: String,
}

impl AttackEvent {
    /// Unordered pair of creature ids for an attack; `None` for status ticks.
    #[must_use]
    pub fn creature_pair(&self) -> Option<(Uuid, Uuid)> {
        let actor = self.actor.as_ref()?;
        let (a, b) = (actor.creature_id, self.target.creature_id);
        Some(if a <= b { (a, b) } else { (b, a) })
    }
}

/// End-of-battle summary of one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideOutcome {
    /// Side identifier.
    pub side_id: Uuid,
    /// Display name.
    pub name: String,
    /// Living creatures left.
    pub survivors: usize,
    /// Sum of HP over living creatures.
    pub remaining_hp: i64,
}

/// The outcome of one battle. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    /// Battle identifier.
    pub battle_id: Uuid,
    /// Winning side.
    pub winner_side_id: Uuid,
    /// Losing side.
    pub loser_side_id: Uuid,
    /// Exchanges resolved.
    pub total_exchanges: u32,
    /// The exchange ceiling ended the battle and remaining HP decided it.
    pub forced_finish: bool,
    /// Log entries in order, possibly truncated.
    pub events: Vec<AttackEvent>,
    /// Entries that happened after the log was full.
    pub events_dropped: u64,
    /// Attacker first, then defender.
    pub sides: Vec<SideOutcome>,
}

impl BattleResult {
    /// Returns `true` if the log lost entries to the cap.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.events_dropped > 0
    }
}

/// Emitted when a battle has been resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleResolved {
    /// Battle identifier.
    pub battle_id: Uuid,
    /// Hash of the skill catalog the battle ran against.
    pub content_hash: String,
    /// Full result.
    pub result: BattleResult,
}

/// Event payload variants for the Combat Resolution context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEventKind {
    /// A battle has been resolved.
    BattleResolved(BattleResolved),
}

/// Domain event envelope for the Combat Resolution context.
#[derive(Debug, Clone)]
pub struct CombatEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CombatEventKind,
}

impl DomainEvent for CombatEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            CombatEventKind::BattleResolved(_) => BATTLE_RESOLVED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("CombatEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
