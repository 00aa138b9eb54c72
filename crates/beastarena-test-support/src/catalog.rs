//! Minimal in-memory skill catalogs for tests.

use beastarena_content::domain::catalog::SkillCatalog;
use beastarena_content::domain::skills::{
    EffectSpec, PassiveReaction, SkillCategory, SkillDefinition, SkillTier, SpecialTrait,
    StatModifier,
};

fn base(id: &str, category: SkillCategory) -> SkillDefinition {
    SkillDefinition {
        id: id.to_owned(),
        name: id.to_owned(),
        category,
        tier: SkillTier::Normal,
        trigger_rate: 0.0,
        damage_multiplier: 1.0,
        attack_type: None,
        critical: false,
        immune_to_counter: false,
        effects: Vec::new(),
        passive: None,
        modifiers: Vec::new(),
        special: None,
    }
}

/// An active skill with the given trigger rate, multiplier and effects.
/// The display name equals the id.
#[must_use]
pub fn active_skill(
    id: &str,
    trigger_rate: f64,
    damage_multiplier: f64,
    effects: Vec<EffectSpec>,
) -> SkillDefinition {
    SkillDefinition {
        trigger_rate,
        damage_multiplier,
        effects,
        ..base(id, SkillCategory::Active)
    }
}

/// A passive skill with the given trigger rate and reaction.
#[must_use]
pub fn passive_skill(id: &str, trigger_rate: f64, reaction: PassiveReaction) -> SkillDefinition {
    SkillDefinition {
        trigger_rate,
        passive: Some(reaction),
        ..base(id, SkillCategory::Passive)
    }
}

/// A buff skill with the given modifiers and optional special trait.
#[must_use]
pub fn buff_skill(
    id: &str,
    modifiers: Vec<StatModifier>,
    special: Option<SpecialTrait>,
) -> SkillDefinition {
    SkillDefinition {
        modifiers,
        special,
        ..base(id, SkillCategory::Buff)
    }
}

/// A debuff skill with the given modifiers.
#[must_use]
pub fn debuff_skill(id: &str, modifiers: Vec<StatModifier>) -> SkillDefinition {
    SkillDefinition {
        modifiers,
        ..base(id, SkillCategory::Debuff)
    }
}

/// Collects definitions into a `SkillCatalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    skills: Vec<SkillDefinition>,
}

impl CatalogBuilder {
    /// Starts an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one definition.
    #[must_use]
    pub fn skill(mut self, definition: SkillDefinition) -> Self {
        self.skills.push(definition);
        self
    }

    /// Builds the catalog.
    ///
    /// # Panics
    ///
    /// Panics if a definition fails validation; fixtures are expected to be
    /// well-formed.
    #[must_use]
    pub fn build(self) -> SkillCatalog {
        SkillCatalog::new(self.skills).expect("test catalog fixtures must be valid")
    }
}
