//! Per-tick simulation systems, run in a fixed order by the engine:
//! traffic, flight, airport, separation, cleanup, snapshot.

pub mod airport;
pub mod cleanup;
pub mod flight;
pub mod separation;
pub mod snapshot;
pub mod traffic;
