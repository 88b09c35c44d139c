//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Simulation logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{AltitudeState, AircraftStatus};
use crate::types::Vec3;
use crate::waypoint::Waypoint;

/// Unique flight callsign. Collision-checked against the session's
/// name registry at spawn; the network sync layer upserts by this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightId {
    pub callsign: String,
}

/// Fixed per-aircraft kinematic parameters, resolved from the difficulty
/// tier at spawn. `initial_speed` already carries the spawn-time
/// difficulty multiplier — nothing re-applies it later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightKinematics {
    pub initial_speed: f64,
    pub turn_speed: f64,
    pub altitude_rate: f64,
    pub bearing_leniency: f64,
}

/// Planned route and progress along it.
///
/// Invariant: `current_stage` is a valid index into `route` while the
/// aircraft's status is `Normal`. The route never contains the origin and
/// always ends at the destination's exact position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub route: Vec<Waypoint>,
    pub current_stage: usize,
    pub current_target: Vec3,
    pub destination: Waypoint,
    pub origin_name: String,
    pub destination_name: String,
}

/// Lifecycle status plus vertical state. `altitude` is unset outside
/// climbs/descents; `Finished` freezes the aircraft entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub status: AircraftStatus,
    pub altitude: Option<AltitudeState>,
}

/// Pilot override. While active, steering follows `bearing_target`
/// (or holds the current bearing if none is commanded) instead of the
/// route target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualControl {
    pub active: bool,
    pub bearing_target: Option<f64>,
}

/// Remaining score value of this flight. Every decrement clamps at zero;
/// the remainder is banked into the session total exactly once when the
/// flight completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub points: i32,
}

/// Transient separation bookkeeping, recomputed every tick.
/// `warned` debounces the violation penalty and the one-shot warning
/// sound: it resets only when no aircraft remain near.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub too_near: Vec<String>,
    pub warned: bool,
}

/// Where an aircraft is within an airport's taxi sequences.
///
/// The stage is stored explicitly rather than re-derived from position
/// equality against the waypoint tables each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiProgress {
    /// Name of the managing airport.
    pub airport: String,
    pub stage: TaxiStage,
    /// Frozen at descent/ascent start; drives the runway altitude/speed
    /// profile until the profile completes.
    pub profile: Option<RunwayProfile>,
}

/// Stages of the airport taxi state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxiStage {
    /// Cycling the entry points while awaiting landing clearance.
    Holding { entry_index: usize },
    /// Clearance granted; finishing the entry cycle before committing
    /// to the runway at entry index 1.
    Inbound { entry_index: usize },
    /// Walking the landing-point sequence.
    LandingRun { index: usize },
    /// At the last landing point with every bay occupied; re-polls the
    /// bays each tick.
    AwaitingBay,
    /// Taxiing from the runway to an allocated bay.
    ToBay { bay: usize },
    /// Stationary in a bay, awaiting takeoff clearance.
    Parked { bay: usize },
    /// Walking the takeoff-point sequence.
    TakeoffRun { index: usize },
}

/// Geometry for a runway ascent/descent profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunwayProfile {
    /// Where the profile began; progress is distance from here.
    pub start: Vec3,
    /// Runway length the progress ratio is measured against.
    pub length: f64,
    /// Altitude at descent start (descent interpolates down from this).
    pub top_altitude: f64,
}

/// An airport: waypoint tables plus runway and bay allocation state.
///
/// Invariants: at most one aircraft holds each runway flag at a time, and
/// a bay, once occupied, is freed only by the bay index the departing
/// aircraft actually parked at. Both are enforced by state-machine
/// discipline, not locks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportState {
    pub name: String,
    pub initial_capacity: u32,
    /// Decremented when a landing clearance is granted, incremented when
    /// a takeoff completes.
    pub capacity: u32,
    pub entry_points: Vec<Waypoint>,
    pub landing_points: Vec<Waypoint>,
    pub parking_points: Vec<Waypoint>,
    pub takeoff_points: Vec<Waypoint>,
    pub landing_runway_busy: bool,
    pub takeoff_runway_busy: bool,
    /// One flag per parking point. Sized off `parking_points` — the bays
    /// are indexed against that list.
    pub bays: Vec<bool>,
    /// Ground taxi speed (units per second).
    pub taxi_speed: f64,
    /// Callsigns of aircraft currently under this airport's management.
    pub managed: Vec<String>,
    /// Callsigns queued for removal from `managed` after this tick's update.
    pub departing: Vec<String>,
}
