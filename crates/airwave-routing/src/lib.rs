//! Greedy route planning for AIRWAVE.
//!
//! Pure functions that turn an origin/destination pair and a waypoint
//! pool into an ordered route. No ECS dependency — operates on plain
//! data from `airwave-core`.

pub mod planner;

pub use planner::{find_route, RouteError};

#[cfg(test)]
mod tests;
