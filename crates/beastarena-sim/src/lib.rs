//! Beast Arena simulator — runs one battle from a catalog file and a
//! matchup file and reports the outcome as JSON.

pub mod config;
pub mod error;
pub mod simulation;
