//! Enumeration types used throughout the simulation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::InvalidDifficulty;

/// What a fixed waypoint is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaypointKind {
    /// Plain routing node, pre-placed at design resolution.
    Airspace,
    /// Airspace boundary point where aircraft appear.
    Entry,
    /// Airspace boundary point where aircraft leave.
    Exit,
    /// Belongs to a specific airport's entry/landing/parking/takeoff sequences.
    Airport,
}

/// Aircraft lifecycle status. `Finished` is terminal: no further kinematic
/// or route updates occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftStatus {
    /// Free flight along the planned route.
    #[default]
    Normal,
    /// Holding pattern, cycling an airport's entry points.
    Waiting,
    /// Cleared to land, descending along the landing sequence.
    Landing,
    /// Stationary in a parking bay, awaiting takeoff clearance.
    Parked,
    /// Taxiing and climbing along the takeoff sequence.
    Takeoff,
    /// Destination reached or crashed.
    Finished,
}

/// Vertical flight state. Only interpreted while status is `Normal` or
/// while an airport drives a runway ascent/descent profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltitudeState {
    Falling,
    #[default]
    Level,
    Climbing,
}

/// Difficulty tier. A closed set — configuration that names anything else
/// fails loudly at parse time rather than silently defaulting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Resolved per-tier tuning values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Minimum 3D distance between aircraft before a violation is flagged.
    pub separation: f64,
    /// Turn rate (radians per second).
    pub turn_speed: f64,
    /// Free-flight climb/descent rate (units per second).
    pub altitude_rate: f64,
    /// Spawn-time multiplier on initial velocity/speed. Applied exactly
    /// once at construction, never on later re-application.
    pub speed_factor: f64,
}

impl Difficulty {
    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                separation: SEPARATION_EASY,
                turn_speed: BASE_TURN_SPEED,
                altitude_rate: BASE_ALTITUDE_RATE,
                speed_factor: 1.0,
            },
            Difficulty::Medium => DifficultySettings {
                separation: SEPARATION_MEDIUM,
                turn_speed: BASE_TURN_SPEED * 2.0,
                altitude_rate: BASE_ALTITUDE_RATE * 2.0,
                speed_factor: 2.0,
            },
            Difficulty::Hard => DifficultySettings {
                separation: SEPARATION_HARD,
                turn_speed: BASE_TURN_SPEED * 3.0,
                altitude_rate: BASE_ALTITUDE_RATE * 3.0,
                speed_factor: 3.0,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = InvalidDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(InvalidDifficulty(other.to_string())),
        }
    }
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
