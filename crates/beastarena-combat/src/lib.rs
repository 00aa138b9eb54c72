//! Beast Arena — Combat Resolution bounded context.
//!
//! Responsible for resolving one battle between two rosters of creatures:
//! turn order, skill triggers, damage, status effects, and the replayable
//! battle log that every competitive mode (arena, tower, siege, dungeon)
//! interprets afterwards.

pub mod application;
pub mod domain;
