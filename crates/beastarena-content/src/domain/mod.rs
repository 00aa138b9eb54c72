//! Domain layer for the Skill Catalog context.

pub mod catalog;
pub mod skills;
pub mod stats;
