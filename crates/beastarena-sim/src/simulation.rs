//! Running one battle from authored files.

use std::path::Path;

use beastarena_combat::application::command_handlers::handle_resolve_battle;
use beastarena_combat::application::query_handlers::{DuelReport, build_duel_report};
use beastarena_combat::domain::commands::ResolveBattle;
use beastarena_combat::domain::events::CombatEventKind;
use beastarena_combat::domain::roster::MatchupRecord;
use beastarena_content::application::loading::load_from_path;
use beastarena_core::clock::Clock;
use beastarena_core::event::{DomainEvent, EventMetadata};
use beastarena_core::rng::DeterministicRng;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::SimConfig;
use crate::error::AppError;

/// Encodings accepted for matchup files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl RosterFormat {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::Config(format!(
                "unsupported roster file: {}",
                path.display()
            ))),
        }
    }
}

/// Decodes a matchup document.
///
/// # Errors
///
/// Returns `AppError::Serialization` if the document is malformed.
pub fn parse_matchup(source: &str, format: RosterFormat) -> Result<MatchupRecord, AppError> {
    let matchup = match format {
        RosterFormat::Yaml => serde_yaml::from_str(source)?,
        RosterFormat::Json => serde_json::from_str(source)?,
    };
    Ok(matchup)
}

/// Reads and decodes a matchup file.
///
/// # Errors
///
/// Returns `AppError::Config` for an unsupported extension, `AppError::Io`
/// if the file cannot be read, and `AppError::Serialization` if it does not
/// decode.
pub fn load_matchup(path: &Path) -> Result<MatchupRecord, AppError> {
    let format = RosterFormat::from_path(path)?;
    let source = std::fs::read_to_string(path)?;
    parse_matchup(&source, format)
}

/// What the simulator prints: the event envelope plus the duel breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Seed the battle ran with, when one was configured.
    pub seed: Option<u64>,
    /// Envelope metadata of the `combat.battle_resolved` event.
    pub metadata: EventMetadata,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Per-duel view of the logged events.
    pub duels: DuelReport,
}

/// Loads the configured catalog and matchup, resolves the battle and builds
/// the report.
///
/// # Errors
///
/// Propagates loading, decoding and engine validation errors.
pub fn run_simulation(
    config: &SimConfig,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Result<SimulationReport, AppError> {
    let catalog = load_from_path(&config.catalog_path)?;
    let (attacker, defender) = load_matchup(&config.roster_path)?.into_sides()?;

    let command = ResolveBattle {
        correlation_id: Uuid::new_v4(),
        battle_id: Uuid::now_v7(),
        attacker,
        defender,
        config: config.battle,
    };
    let event = handle_resolve_battle(&command, &catalog, clock, rng)?;

    let CombatEventKind::BattleResolved(resolved) = &event.kind;
    let duels = build_duel_report(&resolved.result);
    info!(
        battle_id = %resolved.battle_id,
        winner_side_id = %resolved.result.winner_side_id,
        exchanges = resolved.result.total_exchanges,
        duels = duels.duels.len(),
        "simulation complete"
    );

    Ok(SimulationReport {
        seed: config.seed,
        metadata: event.metadata().clone(),
        payload: event.to_payload(),
        duels,
    })
}
