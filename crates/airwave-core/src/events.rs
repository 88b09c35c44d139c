//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::AlertLevel;

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A separation violation episode began (one-shot per episode).
    SeparationWarning { callsign: String },
    /// Two aircraft collided; both flights are over.
    Collision { callsign_a: String, callsign_b: String },
    /// Aircraft handed off to an airport and entered the holding cycle.
    Handoff { callsign: String, airport: String },
    /// Clearance request granted.
    ClearanceGranted { callsign: String, airport: String },
    /// Clearance request denied (capacity or runway busy).
    ClearanceDenied {
        callsign: String,
        airport: String,
        reason: String,
    },
    /// Aircraft left an airport and resumed free flight.
    Departure { callsign: String, airport: String },
    /// Aircraft reached its exit; remaining score banked.
    FlightCompleted { callsign: String, score: i32 },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
