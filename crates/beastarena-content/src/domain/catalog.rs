//! The read-only skill catalog.

use std::collections::HashMap;

use beastarena_core::error::DomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::skills::{EffectSpec, SkillCategory, SkillDefinition};

/// Smallest modifier percent: a -100% debuff.
pub const MIN_MODIFIER_PERCENT: f64 = -1.0;

/// Largest modifier percent: a +1000% buff.
pub const MAX_MODIFIER_PERCENT: f64 = 10.0;

/// On-disk shape of a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// All skill definitions.
    pub skills: Vec<SkillDefinition>,
}

/// Immutable lookup table from skill id to definition.
///
/// Built once per process (or per test) and shared by reference; the combat
/// engine never mutates it.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: HashMap<String, SkillDefinition>,
    content_hash: String,
}

impl SkillCatalog {
    /// Builds a catalog from already-parsed definitions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any definition is malformed or an
    /// id appears twice.
    pub fn new(definitions: Vec<SkillDefinition>) -> Result<Self, DomainError> {
        let canonical = serde_json::to_vec(&definitions)
            .map_err(|e| DomainError::Content(format!("catalog serialization failed: {e}")))?;
        Self::with_hash(definitions, hash_bytes(&canonical))
    }

    /// Parses a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` on malformed YAML and
    /// `DomainError::Validation` on invalid definitions.
    pub fn from_yaml_str(source: &str) -> Result<Self, DomainError> {
        let document: CatalogDocument = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Content(format!("invalid catalog YAML: {e}")))?;
        Self::with_hash(document.skills, hash_bytes(source.as_bytes()))
    }

    /// Parses a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` on malformed JSON and
    /// `DomainError::Validation` on invalid definitions.
    pub fn from_json_str(source: &str) -> Result<Self, DomainError> {
        let document: CatalogDocument = serde_json::from_str(source)
            .map_err(|e| DomainError::Content(format!("invalid catalog JSON: {e}")))?;
        Self::with_hash(document.skills, hash_bytes(source.as_bytes()))
    }

    fn with_hash(
        definitions: Vec<SkillDefinition>,
        content_hash: String,
    ) -> Result<Self, DomainError> {
        let mut skills = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            validate_definition(&definition)?;
            if skills.contains_key(&definition.id) {
                return Err(DomainError::Validation(format!(
                    "duplicate skill id: {}",
                    definition.id
                )));
            }
            skills.insert(definition.id.clone(), definition);
        }
        Ok(Self {
            skills,
            content_hash,
        })
    }

    /// Looks up a skill by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }

    /// Number of skills in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Returns `true` if the catalog holds no skills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Hex SHA-256 of the source document.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Iterates over all definitions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }
}

fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn validate_definition(skill: &SkillDefinition) -> Result<(), DomainError> {
    let invalid = |reason: &str| {
        Err(DomainError::Validation(format!(
            "skill {}: {reason}",
            skill.id
        )))
    };

    if skill.id.trim().is_empty() {
        return Err(DomainError::Validation(
            "skill id must not be empty".to_owned(),
        ));
    }
    if !(0.0..=1.0).contains(&skill.trigger_rate) {
        return invalid("trigger_rate must be within [0, 1]");
    }
    if skill.damage_multiplier < 0.0 {
        return invalid("damage_multiplier must not be negative");
    }

    for effect in &skill.effects {
        match effect {
            EffectSpec::Poison { value, duration }
            | EffectSpec::StatDown {
                value, duration, ..
            }
            | EffectSpec::StatUp {
                value, duration, ..
            } => {
                if *duration == 0 {
                    return invalid("status effect duration must be at least 1");
                }
                if *value < 0.0 {
                    return invalid("status effect value must not be negative");
                }
            }
            EffectSpec::Lifesteal { value } => {
                if *value < 0.0 {
                    return invalid("lifesteal value must not be negative");
                }
            }
        }
    }

    if skill
        .modifiers
        .iter()
        .any(|m| !(MIN_MODIFIER_PERCENT..=MAX_MODIFIER_PERCENT).contains(&m.percent))
    {
        return invalid("modifier percent must be within [-1, 10]");
    }

    match skill.category {
        SkillCategory::Passive if skill.passive.is_none() => {
            invalid("passive skill requires a reaction")
        }
        SkillCategory::Buff | SkillCategory::Debuff
            if skill.modifiers.is_empty() && skill.special.is_none() =>
        {
            invalid("buff/debuff skill requires modifiers or a special trait")
        }
        _ => Ok(()),
    }
}
