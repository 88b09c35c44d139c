//! Simulation snapshot — the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{AltitudeState, AircraftStatus, Difficulty};
use crate::events::{Alert, AudioEvent};
use crate::types::{SimTime, Vec3};

/// Complete read-only state handed to the driver after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub difficulty: Difficulty,
    pub aircraft: Vec<AircraftView>,
    pub airports: Vec<AirportView>,
    pub score: ScoreView,
    pub alerts: Vec<Alert>,
    pub audio_events: Vec<AudioEvent>,
}

/// A visible aircraft for the radar display and HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub callsign: String,
    pub position: Vec3,
    /// Heading in radians (0 = North, clockwise).
    pub bearing: f64,
    pub altitude: f64,
    pub speed: f64,
    pub status: AircraftStatus,
    pub altitude_state: Option<AltitudeState>,
    pub score: i32,
    pub manually_controlled: bool,
    pub route_stage: usize,
    pub route_len: usize,
    pub origin: String,
    pub destination: String,
    /// Callsigns inside this aircraft's separation circle right now.
    pub too_near: Vec<String>,
}

/// Airport allocation state for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportView {
    pub name: String,
    pub capacity: u32,
    pub initial_capacity: u32,
    pub landing_runway_busy: bool,
    pub takeoff_runway_busy: bool,
    pub bays: Vec<bool>,
    pub managed: Vec<String>,
}

/// Running session score for display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    /// Banked points from completed flights.
    pub total: i32,
    pub completed: u32,
    pub crashed: u32,
    pub violations: u32,
}
