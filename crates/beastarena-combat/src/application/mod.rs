//! Application layer for the Combat Resolution context.

pub mod command_handlers;
pub mod query_handlers;
