//! Controller commands sent from the input layer to the simulation.
//!
//! Commands are validated and queued for processing at the next tick
//! boundary. These are the only externally triggered state transitions
//! besides the timer-driven ones.

use serde::{Deserialize, Serialize};

/// All possible controller (ACTO) actions, keyed by flight callsign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControllerCommand {
    // --- Manual steering ---
    /// Take or release manual control. Releasing resets course back to
    /// the current route stage's waypoint.
    ToggleManualControl { callsign: String },
    /// Nudge left by one turn increment. Bypasses the bearing target.
    TurnLeft { callsign: String },
    /// Nudge right by one turn increment. Bypasses the bearing target.
    TurnRight { callsign: String },
    /// Command a bearing to hold (radians, 0 = North, clockwise).
    SetBearing { callsign: String, bearing: f64 },

    // --- Vertical ---
    /// Climb to the high flight level (free flight only).
    ClimbToHigh { callsign: String },
    /// Descend to the low flight level (free flight only).
    DescendToLow { callsign: String },

    // --- Routing ---
    /// Redirect the flight to an existing route stage. Costs score and
    /// releases manual control.
    DirectTo { callsign: String, stage: usize },

    // --- Airport clearances ---
    /// Request landing clearance; gated on capacity and a free landing
    /// runway. Denial is a normal outcome, not an error.
    ClearLanding { callsign: String },
    /// Request takeoff clearance; gated on a free takeoff runway.
    ClearTakeoff { callsign: String },
}
