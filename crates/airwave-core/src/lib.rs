//! Core types and definitions for the AIRWAVE air-traffic simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, waypoints, components, commands, state snapshots,
//! events, errors, and constants. It has no dependency on the ECS or
//! any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod state;
pub mod types;
pub mod waypoint;

#[cfg(test)]
mod tests;
