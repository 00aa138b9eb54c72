//! Domain layer for the Combat Resolution context.

pub mod battle;
pub mod commands;
pub mod creature;
pub mod damage;
pub mod events;
pub mod exchange;
pub mod log;
pub mod roster;
pub mod skills;
pub mod status;
pub mod turn_order;
