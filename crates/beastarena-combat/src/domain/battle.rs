//! The battle orchestrator: a state machine driving exchanges between two
//! sides until one is defeated or the exchange ceiling is reached.

use beastarena_content::domain::catalog::SkillCatalog;
use beastarena_core::error::DomainError;
use beastarena_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::creature::Side;
use super::events::{
    AttackEvent, AttackEventKind, BattleResult, Participant, ReactionKind, ReactionRecord,
    SideOutcome,
};
use super::exchange::{AttackReport, resolve_attack};
use super::log::{BattleLog, DEFAULT_MAX_LOGGED_EVENTS};
use super::skills::bake_skill_modifiers;
use super::status::tick_effects;
use super::turn_order::{Initiative, resolve_turn_order};

/// Exchange ceiling used when the caller does not choose one.
pub const DEFAULT_MAX_EXCHANGES: u32 = 1000;

const ATTACKER: usize = 0;
const DEFENDER: usize = 1;

fn default_max_logged_events() -> Option<usize> {
    Some(DEFAULT_MAX_LOGGED_EVENTS)
}

fn default_max_exchanges() -> u32 {
    DEFAULT_MAX_EXCHANGES
}

/// Per-battle tuning supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Log capacity; `None` keeps every event.
    #[serde(default = "default_max_logged_events")]
    pub max_logged_events: Option<usize>,
    /// Safety ceiling on exchanges.
    #[serde(default = "default_max_exchanges")]
    pub max_exchanges: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_logged_events: default_max_logged_events(),
            max_exchanges: DEFAULT_MAX_EXCHANGES,
        }
    }
}

/// Battle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Sides accepted; skill modifiers not yet baked.
    NotStarted,
    /// Exchanges are being resolved.
    InProgress,
    /// A winner has been decided.
    Finished {
        /// Winning side.
        winner_side_id: Uuid,
    },
}

/// One battle between an attacking and a defending side.
#[derive(Debug)]
pub struct Battle<'c> {
    id: Uuid,
    sides: [Side; 2],
    catalog: &'c SkillCatalog,
    config: BattleConfig,
    phase: BattlePhase,
    exchanges: u32,
    forced_finish: bool,
    log: BattleLog,
}

fn validate_side(side: &Side, role: &str) -> Result<(), DomainError> {
    if side.roster.is_empty() {
        return Err(DomainError::Validation(format!(
            "{role} side {} has an empty roster",
            side.id
        )));
    }
    if let Some(creature) = side.roster.iter().find(|c| c.stats.max_hp <= 0) {
        return Err(DomainError::Validation(format!(
            "creature {} on {role} side {} has non-positive max HP",
            creature.id, side.id
        )));
    }
    if let Some(creature) = side.roster.iter().find(|c| c.current_hp > c.stats.max_hp) {
        return Err(DomainError::Validation(format!(
            "creature {} on {role} side {} has current HP above max HP",
            creature.id, side.id
        )));
    }
    if side.is_defeated() {
        return Err(DomainError::Validation(format!(
            "{role} side {} has no living creature",
            side.id
        )));
    }
    Ok(())
}

fn participant(side: &Side, index: usize) -> Participant {
    let creature = &side.roster[index];
    Participant {
        side_id: side.id,
        side_name: side.display_name(),
        creature_id: creature.id,
        name: creature.name.clone(),
    }
}

fn describe_attack(
    actor: &Participant,
    target: &Participant,
    report: &AttackReport,
    actor_alive: bool,
    target_alive: bool,
) -> String {
    let actor_name = format!("{}'s {}", actor.side_name, actor.name);
    let target_name = format!("{}'s {}", target.side_name, target.name);

    let mut text = if report.dodged {
        format!("{target_name} dodged {actor_name}'s attack")
    } else if report.is_basic() {
        format!(
            "{actor_name} attacked {target_name}, dealing {} damage",
            report.damage
        )
    } else {
        format!(
            "{actor_name} used {} on {target_name}, dealing {} damage",
            report.skill_name, report.damage
        )
    };

    if report.lifesteal_heal > 0 {
        text.push_str(&format!(", healing itself for {}", report.lifesteal_heal));
    }
    if !report.applied_effects.is_empty() {
        text.push_str(&format!(", inflicting {}", report.applied_effects.join(" and ")));
    }
    if report.poison_resisted {
        text.push_str(&format!("; {} resisted the poison", target.name));
    }
    if let Some(reaction) = report.reaction.as_ref().filter(|r| r.kind != ReactionKind::Dodge) {
        let verb = match reaction.kind {
            ReactionKind::Reflect => "reflect",
            _ => "counter",
        };
        text.push_str(&format!(
            "; {} took {} damage from {}'s {verb} ({})",
            actor.name, reaction.returned_damage, target.name, reaction.skill_name
        ));
    }
    if !target_alive {
        text.push_str(&format!("; {} was defeated", target.name));
    }
    if !actor_alive {
        text.push_str(&format!("; {} was defeated", actor.name));
    }
    text
}

impl<'c> Battle<'c> {
    /// Accepts two sides for a battle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a roster is empty, holds a
    /// creature with non-positive max HP or with current HP above max HP, or
    /// has no living creature, or if `max_exchanges` is zero.
    pub fn new(
        id: Uuid,
        attacker: Side,
        defender: Side,
        catalog: &'c SkillCatalog,
        config: BattleConfig,
    ) -> Result<Self, DomainError> {
        validate_side(&attacker, "attacking")?;
        validate_side(&defender, "defending")?;
        if config.max_exchanges == 0 {
            return Err(DomainError::Validation(
                "max_exchanges must be at least 1".to_owned(),
            ));
        }

        Ok(Self {
            id,
            sides: [attacker, defender],
            catalog,
            config,
            phase: BattlePhase::NotStarted,
            exchanges: 0,
            forced_finish: false,
            log: BattleLog::new(config.max_logged_events),
        })
    }

    /// Battle identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Exchanges resolved so far.
    #[must_use]
    pub fn exchanges(&self) -> u32 {
        self.exchanges
    }

    /// Attacker and defender, in that order.
    #[must_use]
    pub fn sides(&self) -> &[Side; 2] {
        &self.sides
    }

    /// Events recorded so far.
    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Bakes buff/debuff skills into every creature and opens the exchange loop.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the battle has already started.
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.phase != BattlePhase::NotStarted {
            return Err(DomainError::Validation(
                "battle must be in NotStarted phase".to_owned(),
            ));
        }

        for side in &mut self.sides {
            for creature in &mut side.roster {
                let missing = bake_skill_modifiers(creature, self.catalog);
                if !missing.is_empty() {
                    warn!(
                        creature = %creature.id,
                        missing = ?missing,
                        "creature references skills absent from the catalog"
                    );
                }
            }
        }

        self.phase = BattlePhase::InProgress;
        info!(
            battle_id = %self.id,
            attacker = %self.sides[ATTACKER].id,
            defender = %self.sides[DEFENDER].id,
            "battle started"
        );
        Ok(())
    }

    /// Resolves one exchange: turn order, first attack, retaliation if the
    /// target survived, then status upkeep.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the battle is not in progress.
    pub fn resolve_exchange(&mut self, rng: &mut dyn DeterministicRng) -> Result<(), DomainError> {
        if self.phase != BattlePhase::InProgress {
            return Err(DomainError::Validation(
                "battle must be in InProgress phase".to_owned(),
            ));
        }
        if self.check_victory() {
            return Ok(());
        }

        let (Some(a_idx), Some(d_idx)) = (
            self.sides[ATTACKER].active_index(),
            self.sides[DEFENDER].active_index(),
        ) else {
            return Ok(());
        };

        self.exchanges += 1;
        let (first, second) = match resolve_turn_order(
            &self.sides[ATTACKER].roster[a_idx],
            &self.sides[DEFENDER].roster[d_idx],
            rng,
        ) {
            Initiative::First => (ATTACKER, DEFENDER),
            Initiative::Second => (DEFENDER, ATTACKER),
        };
        let active = [a_idx, d_idx];
        debug!(
            battle_id = %self.id,
            exchange = self.exchanges,
            first_side = %self.sides[first].id,
            "exchange started"
        );

        self.attack(first, active[first], active[second], rng);
        let both_standing = self.sides[first].roster[active[first]].is_alive()
            && self.sides[second].roster[active[second]].is_alive();
        if both_standing {
            self.attack(second, active[second], active[first], rng);
        }

        self.upkeep([first, second]);

        if !self.check_victory() && self.exchanges >= self.config.max_exchanges {
            self.force_finish();
        }
        Ok(())
    }

    /// Runs the battle to completion and returns its result.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the battle has already finished.
    pub fn run(mut self, rng: &mut dyn DeterministicRng) -> Result<BattleResult, DomainError> {
        if self.phase == BattlePhase::NotStarted {
            self.start()?;
        }
        while self.phase == BattlePhase::InProgress {
            self.resolve_exchange(rng)?;
        }
        self.into_result()
    }

    /// Builds the result of a finished battle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the battle is not finished.
    pub fn into_result(self) -> Result<BattleResult, DomainError> {
        let BattlePhase::Finished { winner_side_id } = self.phase else {
            return Err(DomainError::Validation(
                "battle must be in Finished phase".to_owned(),
            ));
        };
        let loser_side_id = if winner_side_id == self.sides[ATTACKER].id {
            self.sides[DEFENDER].id
        } else {
            self.sides[ATTACKER].id
        };
        let sides = self
            .sides
            .iter()
            .map(|side| SideOutcome {
                side_id: side.id,
                name: side.display_name(),
                survivors: side.roster.iter().filter(|c| c.is_alive()).count(),
                remaining_hp: side.total_remaining_hp(),
            })
            .collect();
        let (events, events_dropped) = self.log.into_parts();

        Ok(BattleResult {
            battle_id: self.id,
            winner_side_id,
            loser_side_id,
            total_exchanges: self.exchanges,
            forced_finish: self.forced_finish,
            events,
            events_dropped,
            sides,
        })
    }

    fn attack(
        &mut self,
        actor_side: usize,
        actor_idx: usize,
        target_idx: usize,
        rng: &mut dyn DeterministicRng,
    ) {
        let (left, right) = self.sides.split_at_mut(DEFENDER);
        let (actors, targets) = if actor_side == ATTACKER {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        };

        let report = resolve_attack(
            &mut actors.roster[actor_idx],
            &mut targets.roster[target_idx],
            self.catalog,
            rng,
        );

        let actor = &actors.roster[actor_idx];
        let target = &targets.roster[target_idx];
        let actor_part = participant(actors, actor_idx);
        let target_part = participant(targets, target_idx);
        let description = describe_attack(
            &actor_part,
            &target_part,
            &report,
            actor.is_alive(),
            target.is_alive(),
        );

        self.log.record(AttackEvent {
            sequence: 0,
            kind: AttackEventKind::Attack,
            actor: Some(actor_part),
            target: target_part,
            skill_name: report.skill_name,
            damage: report.damage,
            actor_hp_after: Some(actor.current_hp),
            target_hp_after: target.current_hp,
            dodged: report.dodged,
            reaction: report.reaction.map(|r| ReactionRecord {
                skill_name: r.skill_name,
                kind: r.kind,
                returned_damage: r.returned_damage,
            }),
            lifesteal_heal: report.lifesteal_heal,
            applied_effects: report.applied_effects,
            description,
        });
    }

    /// Ticks status effects on every living creature, first mover's side
    /// first. Stops as soon as a side is wiped out so that at most one side
    /// can lose its last creature in a single exchange.
    fn upkeep(&mut self, order: [usize; 2]) {
        for side_idx in order {
            for creature_idx in 0..self.sides[side_idx].roster.len() {
                if self.sides.iter().any(Side::is_defeated) {
                    return;
                }
                let ticks = tick_effects(&mut self.sides[side_idx].roster[creature_idx]);
                if ticks.is_empty() {
                    continue;
                }

                let side = &self.sides[side_idx];
                let creature = &side.roster[creature_idx];
                for tick in ticks {
                    let target = participant(side, creature_idx);
                    let mut description = format!(
                        "{}'s {} lost {} HP to poison ({})",
                        target.side_name, target.name, tick.damage, tick.source_skill
                    );
                    if !creature.is_alive() {
                        description.push_str(&format!("; {} was defeated", target.name));
                    }
                    self.log.record(AttackEvent {
                        sequence: 0,
                        kind: AttackEventKind::StatusTick,
                        actor: None,
                        target,
                        skill_name: tick.source_skill,
                        damage: tick.damage,
                        actor_hp_after: None,
                        target_hp_after: creature.current_hp,
                        dodged: false,
                        reaction: None,
                        lifesteal_heal: 0,
                        applied_effects: Vec::new(),
                        description,
                    });
                }
            }
        }
    }

    /// Finishes the battle if a side has no living creature. Returns `true`
    /// once the battle is finished.
    fn check_victory(&mut self) -> bool {
        let winner = if self.sides[ATTACKER].is_defeated() {
            DEFENDER
        } else if self.sides[DEFENDER].is_defeated() {
            ATTACKER
        } else {
            return false;
        };
        self.finish(winner);
        true
    }

    fn force_finish(&mut self) {
        let attacker_hp = self.sides[ATTACKER].total_remaining_hp();
        let defender_hp = self.sides[DEFENDER].total_remaining_hp();
        // Exact ties go to the defender.
        let winner = if attacker_hp > defender_hp {
            ATTACKER
        } else {
            DEFENDER
        };
        warn!(
            battle_id = %self.id,
            exchanges = self.exchanges,
            attacker_hp,
            defender_hp,
            "exchange ceiling reached, deciding by remaining HP"
        );
        self.forced_finish = true;
        self.finish(winner);
    }

    fn finish(&mut self, winner: usize) {
        let winner_side_id = self.sides[winner].id;
        self.phase = BattlePhase::Finished { winner_side_id };
        info!(
            battle_id = %self.id,
            winner = %winner_side_id,
            exchanges = self.exchanges,
            dropped_events = self.log.dropped(),
            "battle finished"
        );
    }
}

/// Validates the sides, runs one battle to completion and returns its result.
///
/// # Errors
///
/// Returns `DomainError::Validation` if either side fails validation.
pub fn resolve_battle(
    battle_id: Uuid,
    attacker: Side,
    defender: Side,
    catalog: &SkillCatalog,
    config: BattleConfig,
    rng: &mut dyn DeterministicRng,
) -> Result<BattleResult, DomainError> {
    Battle::new(battle_id, attacker, defender, catalog, config)?.run(rng)
}
