//! Beast Arena — Skill Catalog bounded context.
//!
//! Responsible for the read-only table of skill definitions the combat
//! engine consults: parsing authored YAML/JSON, validating entries, and
//! fingerprinting the catalog revision.

pub mod application;
pub mod domain;
