//! Adapters from external creature records to battle snapshots.
//!
//! Each record type has exactly one conversion. Fields a source does not
//! track fall back to the `NEUTRAL_*` constants.

use std::str::FromStr;

use beastarena_content::domain::stats::AttackType;
use beastarena_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::creature::{CreatureSnapshot, Side, StatBlock, StatSpread, TieBreakProfile};

/// Grade given to creatures whose source has no grade.
pub const NEUTRAL_GRADE: i32 = 0;

/// Star ratings given to creatures whose source has none.
pub const NEUTRAL_STARS: StatSpread = StatSpread::ZERO;

/// Aptitudes given to creatures whose source has none.
pub const NEUTRAL_APTITUDES: StatSpread = StatSpread::ZERO;

/// Decides a creature's attack type.
///
/// An explicit value wins. Otherwise the nature text decides ("magic" or
/// "法" for magic, "physical" or "物" for physical). Otherwise the only
/// non-zero attack stat decides.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the explicit value is not a known
/// attack type or nothing above decides.
pub fn resolve_attack_type(
    explicit: Option<&str>,
    nature: Option<&str>,
    physical_attack: i64,
    magic_attack: i64,
) -> Result<AttackType, DomainError> {
    if let Some(explicit) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        if explicit.eq_ignore_ascii_case("magical") {
            return Ok(AttackType::Magic);
        }
        return AttackType::from_str(explicit);
    }

    if let Some(nature) = nature.map(str::to_lowercase) {
        if nature.contains("magic") || nature.contains('法') {
            return Ok(AttackType::Magic);
        }
        if nature.contains("physical") || nature.contains('物') {
            return Ok(AttackType::Physical);
        }
    }

    match (physical_attack > 0, magic_attack > 0) {
        (true, false) => Ok(AttackType::Physical),
        (false, true) => Ok(AttackType::Magic),
        _ => Err(DomainError::Validation(format!(
            "unresolvable attack type (nature {nature:?}, physical attack {physical_attack}, magic attack {magic_attack})"
        ))),
    }
}

fn validate_stats(name: &str, stats: &StatBlock) -> Result<(), DomainError> {
    let values = [
        stats.max_hp,
        stats.physical_attack,
        stats.magic_attack,
        stats.physical_defense,
        stats.magic_defense,
        stats.speed,
    ];
    if values.iter().any(|v| *v < 0) {
        return Err(DomainError::Validation(format!(
            "creature {name} has a negative stat"
        )));
    }
    Ok(())
}

/// Per-stat aptitudes of a player-owned creature. Both attack aptitudes are
/// tracked; only the one matching the attack type counts for turn order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerAptitudes {
    /// HP aptitude.
    pub hp: i64,
    /// Physical attack aptitude.
    pub physical_attack: i64,
    /// Magic attack aptitude.
    pub magic_attack: i64,
    /// Physical defense aptitude.
    pub physical_defense: i64,
    /// Magic defense aptitude.
    pub magic_defense: i64,
    /// Speed aptitude.
    pub speed: i64,
}

impl PlayerAptitudes {
    fn spread(self, attack_type: AttackType) -> StatSpread {
        StatSpread {
            hp: self.hp,
            attack: match attack_type {
                AttackType::Physical => self.physical_attack,
                AttackType::Magic => self.magic_attack,
            },
            physical_defense: self.physical_defense,
            magic_defense: self.magic_defense,
            speed: self.speed,
        }
    }
}

/// A player-owned creature as supplied by the roster service. Stats already
/// include equipment bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBeastRecord {
    /// Persistent creature id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Realm (evolution stage) appended to the display name when present.
    #[serde(default)]
    pub realm: Option<String>,
    /// Explicit attack type.
    #[serde(default)]
    pub attack_type: Option<String>,
    /// Free-text nature used when no attack type is given.
    #[serde(default)]
    pub nature: Option<String>,
    /// Combat stats.
    pub stats: StatBlock,
    /// Grade.
    #[serde(default)]
    pub grade: Option<i32>,
    /// Star ratings.
    #[serde(default)]
    pub stars: Option<StatSpread>,
    /// Aptitudes.
    #[serde(default)]
    pub aptitudes: Option<PlayerAptitudes>,
    /// Equipped skill ids.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl TryFrom<PlayerBeastRecord> for CreatureSnapshot {
    type Error = DomainError;

    fn try_from(record: PlayerBeastRecord) -> Result<Self, Self::Error> {
        validate_stats(&record.name, &record.stats)?;
        let attack_type = resolve_attack_type(
            record.attack_type.as_deref(),
            record.nature.as_deref(),
            record.stats.physical_attack,
            record.stats.magic_attack,
        )?;

        let name = match record.realm.as_deref().map(str::trim) {
            Some(realm) if !realm.is_empty() => format!("{}-{realm}", record.name),
            _ => record.name,
        };
        let tie_break = TieBreakProfile {
            grade: record.grade.unwrap_or(NEUTRAL_GRADE),
            stars: record.stars.unwrap_or(NEUTRAL_STARS),
            aptitudes: record
                .aptitudes
                .map_or(NEUTRAL_APTITUDES, |a| a.spread(attack_type)),
        };

        Ok(Self::new(record.id, name, attack_type, record.stats)
            .with_skills(record.skills)
            .with_tie_break(tie_break))
    }
}

/// A scripted creature from encounter content (tower guardians, dungeon and
/// siege defenders). Has no tie-break data and often no persistent id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterBeastRecord {
    /// Persistent id, if the content defines one.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Explicit attack type.
    #[serde(default)]
    pub attack_type: Option<String>,
    /// Free-text nature used when no attack type is given.
    #[serde(default)]
    pub nature: Option<String>,
    /// Combat stats as authored.
    pub stats: StatBlock,
    /// Skill ids.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Converts an encounter creature. Without an authored id the creature gets
/// a stable id derived from `(encounter_key, slot)`. The attack stat that
/// does not match the attack type is zeroed, as encounter content only
/// authors the one that is used.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a stat is negative or the attack type
/// cannot be resolved.
pub fn snapshot_from_encounter(
    record: EncounterBeastRecord,
    encounter_key: u64,
    slot: u64,
) -> Result<CreatureSnapshot, DomainError> {
    validate_stats(&record.name, &record.stats)?;
    let attack_type = resolve_attack_type(
        record.attack_type.as_deref(),
        record.nature.as_deref(),
        record.stats.physical_attack,
        record.stats.magic_attack,
    )?;

    let mut stats = record.stats;
    match attack_type {
        AttackType::Physical => stats.magic_attack = 0,
        AttackType::Magic => stats.physical_attack = 0,
    }
    let id = record
        .id
        .unwrap_or_else(|| Uuid::from_u64_pair(encounter_key, slot));

    Ok(CreatureSnapshot::new(id, record.name, attack_type, stats)
        .with_skills(record.skills)
        .with_tie_break(TieBreakProfile {
            grade: NEUTRAL_GRADE,
            stars: NEUTRAL_STARS,
            aptitudes: NEUTRAL_APTITUDES,
        }))
}

/// One roster slot in a side file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RosterEntry {
    /// A player-owned creature.
    Player(PlayerBeastRecord),
    /// A scripted encounter creature.
    Encounter(EncounterBeastRecord),
}

/// A side as supplied by the caller, before conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideRecord {
    /// Side identifier.
    pub id: Uuid,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Key for deriving encounter creature ids; defaults to the side id's
    /// high bits.
    #[serde(default)]
    pub encounter_key: Option<u64>,
    /// Creatures in fighting order.
    pub creatures: Vec<RosterEntry>,
}

impl SideRecord {
    /// Converts every roster slot, keeping the order.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error.
    pub fn into_side(self) -> Result<Side, DomainError> {
        let encounter_key = self
            .encounter_key
            .unwrap_or_else(|| self.id.as_u64_pair().0);
        let roster = self
            .creatures
            .into_iter()
            .zip(0_u64..)
            .map(|(entry, slot)| match entry {
                RosterEntry::Player(record) => CreatureSnapshot::try_from(record),
                RosterEntry::Encounter(record) => {
                    snapshot_from_encounter(record, encounter_key, slot)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Side::new(self.id, self.name, roster))
    }
}

/// Both sides of one battle, as stored in a roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    /// The side that initiated the battle.
    pub attacker: SideRecord,
    /// The side being challenged.
    pub defender: SideRecord,
}

impl MatchupRecord {
    /// Converts both sides.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error.
    pub fn into_sides(self) -> Result<(Side, Side), DomainError> {
        Ok((self.attacker.into_side()?, self.defender.into_side()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(physical_attack: i64, magic_attack: i64) -> StatBlock {
        StatBlock {
            max_hp: 800,
            physical_attack,
            magic_attack,
            physical_defense: 300,
            magic_defense: 300,
            speed: 90,
        }
    }

    fn player(attack_type: Option<&str>, nature: Option<&str>) -> PlayerBeastRecord {
        PlayerBeastRecord {
            id: Uuid::new_v4(),
            name: "Azure Dragon".to_owned(),
            realm: None,
            attack_type: attack_type.map(str::to_owned),
            nature: nature.map(str::to_owned),
            stats: stats(900, 700),
            grade: Some(3),
            stars: None,
            aptitudes: Some(PlayerAptitudes {
                hp: 10,
                physical_attack: 20,
                magic_attack: 30,
                physical_defense: 1,
                magic_defense: 1,
                speed: 1,
            }),
            skills: vec!["crush".to_owned()],
        }
    }

    fn encounter() -> EncounterBeastRecord {
        EncounterBeastRecord {
            id: None,
            name: "Tower Guardian".to_owned(),
            attack_type: Some("physical".to_owned()),
            nature: None,
            stats: stats(500, 400),
            skills: Vec::new(),
        }
    }

    #[test]
    fn test_explicit_attack_type_wins() {
        assert_eq!(
            resolve_attack_type(Some("magic"), Some("physical nature"), 100, 0).unwrap(),
            AttackType::Magic
        );
        assert_eq!(
            resolve_attack_type(Some("Magical"), None, 100, 0).unwrap(),
            AttackType::Magic
        );
    }

    #[test]
    fn test_nature_decides_without_explicit_type() {
        assert_eq!(
            resolve_attack_type(None, Some("法系"), 100, 100).unwrap(),
            AttackType::Magic
        );
        assert_eq!(
            resolve_attack_type(None, Some("物系"), 100, 100).unwrap(),
            AttackType::Physical
        );
        assert_eq!(
            resolve_attack_type(None, Some("Physical Brute"), 0, 100).unwrap(),
            AttackType::Physical
        );
    }

    #[test]
    fn test_single_attack_stat_decides_last() {
        assert_eq!(
            resolve_attack_type(None, None, 0, 100).unwrap(),
            AttackType::Magic
        );
        assert_eq!(
            resolve_attack_type(None, Some("gentle"), 100, 0).unwrap(),
            AttackType::Physical
        );
    }

    #[test]
    fn test_unresolvable_attack_type_is_validation_error() {
        assert!(matches!(
            resolve_attack_type(None, None, 100, 100),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            resolve_attack_type(Some("psychic"), None, 100, 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_player_record_uses_matching_attack_aptitude() {
        let snapshot = CreatureSnapshot::try_from(player(Some("magic"), None)).unwrap();

        assert_eq!(snapshot.attack_type, AttackType::Magic);
        assert_eq!(snapshot.tie_break.aptitudes.attack, 30);
        assert_eq!(snapshot.tie_break.grade, 3);
        assert_eq!(snapshot.tie_break.stars, NEUTRAL_STARS);
        assert_eq!(snapshot.current_hp, 800);
        assert_eq!(snapshot.skills, vec!["crush".to_owned()]);
    }

    #[test]
    fn test_player_record_appends_realm() {
        let mut record = player(Some("physical"), None);
        record.realm = Some("Ascended".to_owned());
        let snapshot = CreatureSnapshot::try_from(record).unwrap();
        assert_eq!(snapshot.name, "Azure Dragon-Ascended");
    }

    #[test]
    fn test_player_record_without_tie_break_data_is_neutral() {
        let mut record = player(Some("physical"), None);
        record.grade = None;
        record.aptitudes = None;
        let snapshot = CreatureSnapshot::try_from(record).unwrap();

        assert_eq!(snapshot.tie_break.grade, NEUTRAL_GRADE);
        assert_eq!(snapshot.tie_break.aptitudes, NEUTRAL_APTITUDES);
    }

    #[test]
    fn test_negative_stat_rejected() {
        let mut record = player(Some("physical"), None);
        record.stats.speed = -1;
        assert!(CreatureSnapshot::try_from(record).is_err());
    }

    #[test]
    fn test_encounter_ids_are_stable_per_slot() {
        let a = snapshot_from_encounter(encounter(), 42, 0).unwrap();
        let b = snapshot_from_encounter(encounter(), 42, 0).unwrap();
        let c = snapshot_from_encounter(encounter(), 42, 1).unwrap();

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_encounter_zeroes_unused_attack() {
        let snapshot = snapshot_from_encounter(encounter(), 1, 0).unwrap();
        assert_eq!(snapshot.stats.physical_attack, 500);
        assert_eq!(snapshot.stats.magic_attack, 0);
        assert_eq!(snapshot.tie_break, TieBreakProfile::default());
    }

    #[test]
    fn test_side_record_parses_mixed_roster() {
        let json = serde_json::json!({
            "id": "6f1c2a52-7d0e-4b5a-9d7b-1d2f3e4a5b6c",
            "name": "Dungeon Floor 3",
            "creatures": [
                {
                    "source": "encounter",
                    "name": "Cave Bat",
                    "attack_type": "magic",
                    "stats": {
                        "max_hp": 300, "physical_attack": 0, "magic_attack": 250,
                        "physical_defense": 80, "magic_defense": 120, "speed": 140
                    }
                },
                {
                    "source": "player",
                    "id": "0b7e7c1e-3c9a-4f0e-8a55-6c2b7f0d9e11",
                    "name": "Captured Bat",
                    "nature": "magic",
                    "stats": {
                        "max_hp": 350, "physical_attack": 0, "magic_attack": 260,
                        "physical_defense": 90, "magic_defense": 130, "speed": 150
                    }
                }
            ]
        });
        let record: SideRecord = serde_json::from_value(json).unwrap();
        let side = record.into_side().unwrap();

        assert_eq!(side.roster.len(), 2);
        assert_eq!(side.roster[0].name, "Cave Bat");
        assert_eq!(side.roster[1].attack_type, AttackType::Magic);
    }
}
