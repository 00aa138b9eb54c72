//! Command handlers for the Combat Resolution context.
//!
//! Handlers validate the command, run the battle synchronously and return
//! the resulting domain event. Persisting it is the caller's concern.

use beastarena_content::domain::catalog::SkillCatalog;
use beastarena_core::clock::Clock;
use beastarena_core::command::Command;
use beastarena_core::error::DomainError;
use beastarena_core::event::EventMetadata;
use beastarena_core::rng::DeterministicRng;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::battle::resolve_battle;
use crate::domain::commands::ResolveBattle;
use crate::domain::events::{
    BATTLE_RESOLVED_EVENT_TYPE, BattleResolved, CombatEvent, CombatEventKind,
};

/// Handles the `ResolveBattle` command: runs the battle against `catalog`
/// and wraps the result in a `combat.battle_resolved` event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if either side is malformed.
#[instrument(
    skip(command, catalog, clock, rng),
    fields(
        battle_id = %command.battle_id,
        correlation_id = %command.correlation_id(),
    )
)]
pub fn handle_resolve_battle(
    command: &ResolveBattle,
    catalog: &SkillCatalog,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Result<CombatEvent, DomainError> {
    info!(command_type = command.command_type(), "handling resolve_battle command");

    let result = resolve_battle(
        command.battle_id,
        command.attacker.clone(),
        command.defender.clone(),
        catalog,
        command.config,
        rng,
    )?;

    Ok(CombatEvent {
        metadata: EventMetadata {
            event_id: Uuid::new_v4(),
            event_type: BATTLE_RESOLVED_EVENT_TYPE.to_owned(),
            aggregate_id: command.battle_id,
            sequence_number: 1,
            correlation_id: command.correlation_id,
            causation_id: command.correlation_id,
            occurred_at: clock.now(),
        },
        kind: CombatEventKind::BattleResolved(BattleResolved {
            battle_id: command.battle_id,
            content_hash: catalog.content_hash().to_owned(),
            result,
        }),
    })
}
