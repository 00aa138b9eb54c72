//! Application layer for the Skill Catalog context.

pub mod loading;
