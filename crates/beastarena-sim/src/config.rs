//! Simulator configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use beastarena_combat::domain::battle::BattleConfig;

use crate::error::AppError;

/// Everything the simulator needs to run one battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Skill catalog file (`.yaml`, `.yml` or `.json`).
    pub catalog_path: PathBuf,
    /// Matchup file holding the attacker and defender sides.
    pub roster_path: PathBuf,
    /// Fixed seed for a reproducible battle; entropy when absent.
    pub seed: Option<u64>,
    /// Engine limits.
    pub battle: BattleConfig,
}

impl SimConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// See [`SimConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let catalog_path = lookup("SKILL_CATALOG_PATH")
            .ok_or_else(|| AppError::Config("SKILL_CATALOG_PATH must be set".into()))?;
        let roster_path = lookup("ROSTER_PATH")
            .ok_or_else(|| AppError::Config("ROSTER_PATH must be set".into()))?;

        let defaults = BattleConfig::default();
        let max_logged_events = match lookup("MAX_LOGGED_EVENTS").as_deref() {
            None => defaults.max_logged_events,
            Some("none" | "unlimited") => None,
            Some(raw) => Some(parse_var("MAX_LOGGED_EVENTS", raw)?),
        };
        let max_exchanges = match lookup("MAX_EXCHANGES") {
            Some(raw) => parse_var("MAX_EXCHANGES", &raw)?,
            None => defaults.max_exchanges,
        };
        let seed = lookup("BATTLE_SEED")
            .map(|raw| parse_var("BATTLE_SEED", &raw))
            .transpose()?;

        Ok(Self {
            catalog_path: PathBuf::from(catalog_path),
            roster_path: PathBuf::from(roster_path),
            seed,
            battle: BattleConfig {
                max_logged_events,
                max_exchanges,
            },
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}")))
}
