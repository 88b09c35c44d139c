//! Error types for controller commands and world configuration.
//!
//! Denied clearances are deliberately NOT errors — they are normal
//! outcomes surfaced as events. Errors here cover programming/config
//! mistakes and commands that cannot apply to the named flight.

use thiserror::Error;

use crate::enums::AircraftStatus;

/// A controller command that could not be applied.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no aircraft with callsign {0}")]
    UnknownCallsign(String),

    #[error("{callsign} cannot accept that command while {status:?}")]
    InvalidState {
        callsign: String,
        status: AircraftStatus,
    },

    #[error("{0} is not under manual control")]
    NotManual(String),

    #[error("route stage {stage} out of range for {callsign} (route length {len})")]
    StageOutOfRange {
        callsign: String,
        stage: usize,
        len: usize,
    },

    #[error("no airport named {0}")]
    UnknownAirport(String),
}

/// An unrecognized difficulty tier name.
#[derive(Debug, Error)]
#[error("unknown difficulty tier: {0:?} (expected easy, medium or hard)")]
pub struct InvalidDifficulty(pub String);

/// Static world geometry that violates the taxi state machine's shape
/// requirements. Caught at setup, before any aircraft exists.
#[derive(Debug, Error)]
pub enum WorldConfigError {
    #[error("airport {name}: needs at least {required} {sequence} points, has {actual}")]
    TooFewWaypoints {
        name: String,
        sequence: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("airport {name}: parking bay count {bays} does not match parking points {points}")]
    BayCountMismatch {
        name: String,
        bays: usize,
        points: usize,
    },

    #[error("world has no exit points")]
    NoExits,
}
