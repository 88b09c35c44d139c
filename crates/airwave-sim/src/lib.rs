//! Simulation engine for AIRWAVE.
//!
//! Owns the hecs ECS world, runs the per-tick systems in a fixed order,
//! and produces `SimSnapshot`s for the driver. Completely headless,
//! enabling deterministic testing.

pub mod engine;
pub mod names;
pub mod scoring;
pub mod sync;
pub mod systems;
pub mod world;

pub use airwave_core as core;
pub use engine::SimEngine;
