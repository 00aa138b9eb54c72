//! Shared test doubles and fixtures for the Beast Arena battle engine.

mod catalog;
mod clock;
mod rng;

pub use catalog::{CatalogBuilder, active_skill, buff_skill, debuff_skill, passive_skill};
pub use clock::FixedClock;
pub use rng::{FixedRng, MockRng, SequenceRng};
