//! Flight callsign generation.
//!
//! The registry is owned by the engine and scoped to one simulation
//! session — no process-wide mutable state. Names are never recycled
//! within a session, so a late network upsert can't collide with a
//! despawned flight.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

const AIRLINE_CODES: &[&str] = &[
    "BAW", "DLH", "AFR", "KLM", "RYR", "EZY", "SAS", "UAE", "AAL", "UAL",
];

/// Session-scoped registry of used callsigns.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh callsign, collision-checked against the session.
    pub fn generate(&mut self, rng: &mut ChaCha8Rng) -> String {
        loop {
            let code = AIRLINE_CODES[rng.gen_range(0..AIRLINE_CODES.len())];
            let number: u32 = rng.gen_range(100..1000);
            let callsign = format!("{code}{number}");
            if self.used.insert(callsign.clone()) {
                return callsign;
            }
        }
    }

    /// Record an externally supplied callsign (network upsert insert path).
    /// Returns false if it was already known.
    pub fn claim(&mut self, callsign: &str) -> bool {
        self.used.insert(callsign.to_string())
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.used.contains(callsign)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
