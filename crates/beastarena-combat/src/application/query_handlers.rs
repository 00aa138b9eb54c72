//! Query handlers for the Combat Resolution context.
//!
//! Read-only views built from a finished [`BattleResult`]. Reporting callers
//! (arena, tower, siege, dungeon) share these instead of re-deriving duels.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::events::{AttackEvent, BattleResult, Participant};
use crate::domain::log::segment_by_duel;

/// One creature's standing at the end of a duel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelFighter {
    /// Side the creature fights for.
    pub side_id: Uuid,
    /// Side display name.
    pub side_name: String,
    /// Creature identifier.
    pub creature_id: Uuid,
    /// Creature display name.
    pub name: String,
    /// HP after the last event of the duel that involved this creature.
    pub hp_after: i64,
}

/// Read-only view of one duel.
#[derive(Debug, Clone, Serialize)]
pub struct DuelView {
    /// 1-based duel number.
    pub number: usize,
    /// The creatures seen in this duel, in order of first appearance.
    pub fighters: Vec<DuelFighter>,
    /// Side that won the duel.
    pub winner_side_id: Uuid,
    /// Winning creature, when the duel identifies one.
    pub winner: Option<DuelFighter>,
    /// English victory sentence.
    pub victory: String,
    /// Events of the duel in log order.
    pub events: Vec<AttackEvent>,
}

/// Read-only view of a whole battle, split into duels.
#[derive(Debug, Clone, Serialize)]
pub struct DuelReport {
    /// Battle identifier.
    pub battle_id: Uuid,
    /// Overall winner.
    pub winner_side_id: Uuid,
    /// `true` if the attacking side won the battle.
    pub attacker_victory: bool,
    /// Duels won by the attacking side.
    pub attacker_duel_wins: usize,
    /// Duels won by the defending side.
    pub defender_duel_wins: usize,
    /// The log lost events to the cap, so the last duel may be incomplete.
    pub truncated: bool,
    /// Duels in order.
    pub duels: Vec<DuelView>,
}

fn record_fighter(fighters: &mut Vec<DuelFighter>, who: &Participant, hp_after: i64) {
    if let Some(existing) = fighters
        .iter_mut()
        .find(|f| f.creature_id == who.creature_id)
    {
        existing.hp_after = hp_after;
    } else {
        fighters.push(DuelFighter {
            side_id: who.side_id,
            side_name: who.side_name.clone(),
            creature_id: who.creature_id,
            name: who.name.clone(),
            hp_after,
        });
    }
}

/// Picks the duel winner: the only survivor, else the fighter with more HP.
/// `None` when the duel cannot tell them apart.
fn duel_winner(fighters: &[DuelFighter]) -> Option<&DuelFighter> {
    let [a, b] = fighters else {
        return None;
    };
    match (a.hp_after > 0, b.hp_after > 0) {
        (true, false) => Some(a),
        (false, true) => Some(b),
        _ if a.hp_after > b.hp_after => Some(a),
        _ if b.hp_after > a.hp_after => Some(b),
        _ => None,
    }
}

fn side_name(result: &BattleResult, side_id: Uuid) -> String {
    result
        .sides
        .iter()
        .find(|side| side.side_id == side_id)
        .map_or_else(|| side_id.to_string(), |side| side.name.clone())
}

/// Splits a finished battle into numbered duels with a winner and victory
/// sentence each.
#[must_use]
pub fn build_duel_report(result: &BattleResult) -> DuelReport {
    let attacker_side_id = result.sides.first().map(|side| side.side_id);

    let duels: Vec<DuelView> = segment_by_duel(&result.events)
        .into_iter()
        .map(|segment| {
            let mut fighters = Vec::new();
            for event in &segment.events {
                if let (Some(actor), Some(hp)) = (&event.actor, event.actor_hp_after) {
                    record_fighter(&mut fighters, actor, hp);
                }
                record_fighter(&mut fighters, &event.target, event.target_hp_after);
            }

            let winner = duel_winner(&fighters).cloned();
            let winner_side_id = winner
                .as_ref()
                .map_or(result.winner_side_id, |w| w.side_id);
            let victory = match &winner {
                Some(w) => format!(
                    "{}'s {} won with {} HP remaining",
                    w.side_name, w.name, w.hp_after
                ),
                None => format!("{} won", side_name(result, winner_side_id)),
            };

            DuelView {
                number: segment.index,
                fighters,
                winner_side_id,
                winner,
                victory,
                events: segment.events,
            }
        })
        .collect();

    let attacker_duel_wins = duels
        .iter()
        .filter(|duel| Some(duel.winner_side_id) == attacker_side_id)
        .count();

    DuelReport {
        battle_id: result.battle_id,
        winner_side_id: result.winner_side_id,
        attacker_victory: Some(result.winner_side_id) == attacker_side_id,
        attacker_duel_wins,
        defender_duel_wins: duels.len() - attacker_duel_wins,
        truncated: result.is_truncated(),
        duels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{AttackEventKind, SideOutcome};

    const PLAYER: Uuid = Uuid::from_u128(0xA);
    const TOWER: Uuid = Uuid::from_u128(0xB);

    fn who(side_id: Uuid, creature: u128, name: &str) -> Participant {
        Participant {
            side_id,
            side_name: if side_id == PLAYER { "Player" } else { "Tower" }.to_owned(),
            creature_id: Uuid::from_u128(creature),
            name: name.to_owned(),
        }
    }

    fn hit(actor: &Participant, target: &Participant, actor_hp: i64, target_hp: i64) -> AttackEvent {
        AttackEvent {
            sequence: 0,
            kind: AttackEventKind::Attack,
            actor: Some(actor.clone()),
            target: target.clone(),
            skill_name: "basic".to_owned(),
            damage: 10,
            actor_hp_after: Some(actor_hp),
            target_hp_after: target_hp,
            dodged: false,
            reaction: None,
            lifesteal_heal: 0,
            applied_effects: Vec::new(),
            description: String::new(),
        }
    }

    fn result(events: Vec<AttackEvent>, winner: Uuid, dropped: u64) -> BattleResult {
        BattleResult {
            battle_id: Uuid::from_u128(1),
            winner_side_id: winner,
            loser_side_id: if winner == PLAYER { TOWER } else { PLAYER },
            total_exchanges: 3,
            forced_finish: false,
            events,
            events_dropped: dropped,
            sides: vec![
                SideOutcome {
                    side_id: PLAYER,
                    name: "Player".to_owned(),
                    survivors: 1,
                    remaining_hp: 50,
                },
                SideOutcome {
                    side_id: TOWER,
                    name: "Tower".to_owned(),
                    survivors: 0,
                    remaining_hp: 0,
                },
            ],
        }
    }

    #[test]
    fn test_duels_numbered_with_survivor_as_winner() {
        // Arrange
        let wolf = who(PLAYER, 1, "Storm Wolf");
        let moth = who(TOWER, 2, "Moth");
        let bat = who(TOWER, 3, "Bat");
        let events = vec![
            hit(&wolf, &moth, 90, 20),
            hit(&moth, &wolf, 80, 20),
            hit(&wolf, &moth, 80, 0),
            hit(&bat, &wolf, 60, 0),
        ];

        // Act
        let report = build_duel_report(&result(events, TOWER, 0));

        // Assert
        assert_eq!(report.duels.len(), 2);
        assert_eq!(report.duels[0].number, 1);
        assert_eq!(report.duels[0].winner_side_id, PLAYER);
        assert_eq!(report.duels[0].victory, "Player's Storm Wolf won with 80 HP remaining");
        assert_eq!(report.duels[1].winner_side_id, TOWER);
        assert_eq!(report.attacker_duel_wins, 1);
        assert_eq!(report.defender_duel_wins, 1);
        assert!(!report.attacker_victory);
    }

    #[test]
    fn test_truncated_duel_decided_by_remaining_hp() {
        // Arrange
        let wolf = who(PLAYER, 1, "Storm Wolf");
        let moth = who(TOWER, 2, "Moth");
        let events = vec![hit(&wolf, &moth, 90, 30), hit(&moth, &wolf, 30, 85)];

        // Act
        let report = build_duel_report(&result(events, PLAYER, 12));

        // Assert
        assert!(report.truncated);
        assert_eq!(report.duels[0].winner_side_id, PLAYER);
        assert_eq!(report.duels[0].fighters.len(), 2);
    }

    #[test]
    fn test_indistinguishable_duel_falls_back_to_battle_winner() {
        // Arrange
        let wolf = who(PLAYER, 1, "Storm Wolf");
        let moth = who(TOWER, 2, "Moth");
        let events = vec![hit(&wolf, &moth, 50, 50)];

        // Act
        let report = build_duel_report(&result(events, TOWER, 0));

        // Assert
        assert!(report.duels[0].winner.is_none());
        assert_eq!(report.duels[0].winner_side_id, TOWER);
        assert_eq!(report.duels[0].victory, "Tower won");
    }

    #[test]
    fn test_empty_log_has_no_duels() {
        let report = build_duel_report(&result(Vec::new(), PLAYER, 0));
        assert!(report.duels.is_empty());
        assert!(report.attacker_victory);
    }
}
