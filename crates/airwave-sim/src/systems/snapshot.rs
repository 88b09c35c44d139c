//! Per-tick snapshot assembly for the driver.
//!
//! Views are sorted by callsign/name so two engines with identical seeds
//! produce byte-identical serialized snapshots.

use hecs::World;

use airwave_core::components::{
    AirportState, FlightId, FlightPlan, FlightState, ManualControl, Proximity, Score,
};
use airwave_core::enums::Difficulty;
use airwave_core::events::{Alert, AudioEvent};
use airwave_core::state::{AircraftView, AirportView, ScoreView, SimSnapshot};
use airwave_core::types::{Position, SimTime, Velocity};

use crate::scoring::ScoreState;

pub fn build(
    world: &World,
    time: &SimTime,
    difficulty: Difficulty,
    audio_events: Vec<AudioEvent>,
    alerts: Vec<Alert>,
    score: &ScoreState,
) -> SimSnapshot {
    let mut aircraft: Vec<AircraftView> = world
        .query::<(
            &FlightId,
            &Position,
            &Velocity,
            &FlightPlan,
            &FlightState,
            &ManualControl,
            &Score,
            &Proximity,
        )>()
        .iter()
        .map(
            |(_, (id, pos, vel, plan, state, manual, score, prox))| AircraftView {
                callsign: id.callsign.clone(),
                position: pos.0,
                bearing: vel.heading(),
                altitude: pos.0.z,
                speed: vel.speed(),
                status: state.status,
                altitude_state: state.altitude,
                score: score.points,
                manually_controlled: manual.active,
                route_stage: plan.current_stage,
                route_len: plan.route.len(),
                origin: plan.origin_name.clone(),
                destination: plan.destination_name.clone(),
                too_near: prox.too_near.clone(),
            },
        )
        .collect();
    aircraft.sort_by(|a, b| a.callsign.cmp(&b.callsign));

    let mut airports: Vec<AirportView> = world
        .query::<&AirportState>()
        .iter()
        .map(|(_, ap)| AirportView {
            name: ap.name.clone(),
            capacity: ap.capacity,
            initial_capacity: ap.initial_capacity,
            landing_runway_busy: ap.landing_runway_busy,
            takeoff_runway_busy: ap.takeoff_runway_busy,
            bays: ap.bays.clone(),
            managed: ap.managed.clone(),
        })
        .collect();
    airports.sort_by(|a, b| a.name.cmp(&b.name));

    SimSnapshot {
        time: *time,
        difficulty,
        aircraft,
        airports,
        score: ScoreView {
            total: score.total,
            completed: score.completed,
            crashed: score.crashed,
            violations: score.violations,
        },
        alerts,
        audio_events,
    }
}
